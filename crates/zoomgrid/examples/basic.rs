//! Example: Basic usage of zoomgrid
//!
//! Run with `RUST_LOG=zoomgrid=debug` to watch overlays being cached.

use tracing_subscriber::EnvFilter;
use zoomgrid::{GalleryOptions, GalleryRegistry};

const PAGE: &str = r#"
<!DOCTYPE html>
<html>
    <body>
        <div class="gallery">
            <ul class="gallery-items">
                <li class="gallery-item" id="picture1">
                    <a href="full/1.jpg" class="gallery-image">
                        <img src="thumb/1.jpg" data-highres-image="full/1.jpg">
                        <span class="image-zoom">+</span>
                    </a>
                </li>
                <li class="gallery-item" id="picture2">
                    <a href="full/2.jpg" class="gallery-image">
                        <img src="thumb/2.jpg" data-highres-image="full/2.jpg">
                        <span class="image-zoom">+</span>
                    </a>
                </li>
                <li class="gallery-item" id="picture3">
                    <a href="full/3.jpg" class="gallery-image">
                        <img src="thumb/3.jpg" data-highres-image="full/3.jpg">
                        <span class="image-zoom">+</span>
                    </a>
                </li>
            </ul>
        </div>
    </body>
</html>
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("zoomgrid v{}", zoomgrid::VERSION);

    let mut doc = zoomgrid::html::HtmlParser::new()
        .parse_with_url(PAGE, "https://example.com/gallery#picture=2")?;

    let mut galleries = GalleryRegistry::new();
    let options = GalleryOptions::from_json(r#"{"cache_size": 2}"#)?;
    let roots = galleries.attach(&mut doc, ".gallery", &options)?;

    let report = |galleries: &GalleryRegistry, action: &str| {
        for &root in &roots {
            if let Some(gallery) = galleries.get(root) {
                println!(
                    "{action:<24} zoom={:<12} cached={:?}",
                    gallery.current_zoom().unwrap_or("-"),
                    gallery.cache().keys().collect::<Vec<_>>()
                );
            }
        }
    };
    report(&galleries, "opened from #picture=2");

    for picture in [1, 3, 3, 2, 1] {
        let Some(link) = doc.query_selector(&format!("#picture{picture} .gallery-image"))? else {
            continue;
        };
        let event = galleries.dispatch_click(&mut doc, link);
        let action = format!(
            "click picture{picture}{}",
            if event.is_default_prevented() { "" } else { " (navigates)" }
        );
        report(&galleries, &action);
    }

    let overlays = doc.query_selector_all(".state-zoom")?;
    println!("Active overlays: {}", overlays.len());
    Ok(())
}

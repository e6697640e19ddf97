//! Comprehensive tests for zoomgrid-html
//!
//! Markup shapes a gallery page is built from, plus malformed input.

use zoomgrid_dom::ElementQuery;
use zoomgrid_html::{HtmlParser, parse};

#[test]
fn test_parse_minimal_html() {
    let doc = parse("").unwrap();
    assert!(doc.tree().len() >= 1, "Even empty HTML should have root");
    assert!(doc.query_selector("body").unwrap().is_some());
}

#[test]
fn test_parse_gallery_markup() {
    let html = r#"
        <!DOCTYPE html>
        <html>
            <body>
                <ul class="gallery-items">
                    <li class="gallery-item" id="picture1">
                        <a href="full/1.jpg" class="gallery-image">
                            <img src="thumb/1.jpg" data-highres-image="full/1.jpg">
                            <span class="image-zoom">zoom</span>
                        </a>
                    </li>
                    <li class="gallery-item" id="picture2">
                        <a href="full/2.jpg" class="gallery-image">
                            <img src="thumb/2.jpg" data-highres-image="full/2.jpg">
                            <span class="image-zoom">zoom</span>
                        </a>
                    </li>
                </ul>
            </body>
        </html>
    "#;

    let doc = HtmlParser::new().parse(html).unwrap();
    let tree = doc.tree();

    let items = doc.query_selector_all(".gallery-items .gallery-item").unwrap();
    assert_eq!(items.len(), 2);

    let zooms = doc.query_selector_all("#picture2 .image-zoom").unwrap();
    assert_eq!(zooms.len(), 1);
    assert_eq!(tree.closest_ancestor(zooms[0], ".gallery-item").unwrap(), Some(items[1]));

    let img = tree.query_selector(items[0], "img").unwrap().unwrap();
    assert_eq!(tree.data(img, "highres-image"), Some("full/1.jpg"));
}

#[test]
fn test_parse_malformed_html() {
    let html = r#"
        <div class="gallery-item">
            <p>Unclosed paragraph
            <span>Unclosed span
        </div>
        <p>Another paragraph without closing
    "#;

    let doc = parse(html).unwrap();
    assert_eq!(doc.query_selector_all(".gallery-item").unwrap().len(), 1);
}

#[test]
fn test_parse_comments_kept_whitespace_dropped() {
    let html = "<div id=\"c\">\n   <!-- note -->\n   </div>";
    let doc = parse(html).unwrap();
    let div = doc.get_element_by_id("c").unwrap();

    let children: Vec<_> = doc.tree().children(div).collect();
    assert_eq!(children.len(), 1);
    assert!(!doc.tree().get(children[0]).unwrap().is_element());
}

#[test]
fn test_parse_entities_and_unicode() {
    let doc = parse("<p id=\"t\">&lt;tag&gt; &amp; Ñoño</p>").unwrap();
    let p = doc.get_element_by_id("t").unwrap();
    assert_eq!(doc.tree().text_content(p), "<tag> & Ñoño");
}

#[test]
fn test_parse_large_gallery() {
    let mut html = String::from("<ul class=\"gallery-items\">");
    for i in 0..500 {
        html.push_str(&format!(r#"<li class="gallery-item" id="picture{i}">"#));
        html.push_str(&format!(r#"<img data-highres-image="full/{i}.jpg"></li>"#));
    }
    html.push_str("</ul>");

    let doc = parse(&html).unwrap();
    assert_eq!(doc.query_selector_all(".gallery-item img").unwrap().len(), 500);
    assert!(doc.get_element_by_id("picture499").is_some());
}

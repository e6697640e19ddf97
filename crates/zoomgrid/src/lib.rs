//! zoomgrid
//!
//! Lightbox-style zoom gallery for a grid of thumbnails.
//!
//! Clicking a thumbnail's zoom control drops an enlarged copy of its grid
//! item over the grid; clicking it again (or the copy) takes it away.
//! Copies are kept in a small FIFO cache so a picture opened twice reuses
//! the same node.
//!
//! # Example
//! ```rust,ignore
//! use zoomgrid::{GalleryOptions, GalleryRegistry};
//!
//! let mut doc = zoomgrid::html::parse(PAGE)?;
//! let mut galleries = GalleryRegistry::new();
//! let roots = galleries.attach(&mut doc, ".gallery", &GalleryOptions::default())?;
//! let event = galleries.dispatch_click(&mut doc, thumbnail);
//! assert!(event.is_default_prevented());
//! ```

mod cache;
mod config;
mod gallery;
mod registry;

pub use cache::OverlayCache;
pub use config::{GalleryConfig, GalleryOptions};
pub use gallery::{Gallery, GalleryId, ZoomState};
pub use registry::GalleryRegistry;

// Re-export sub-crates for advanced usage
pub use zoomgrid_dom as dom;
pub use zoomgrid_html as html;

use zoomgrid_dom::{DomError, NodeId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Gallery errors
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Invalid gallery options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Zoom trigger {0:?} is not inside a gallery item")]
    MissingItem(NodeId),
}

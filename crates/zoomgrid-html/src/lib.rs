//! zoomgrid HTML loader
//!
//! Builds a `zoomgrid_dom::Document` from markup using html5ever, so a
//! gallery page can be declared the same way a browser would receive it.

mod parser;

pub use parser::HtmlParser;
pub use zoomgrid_dom::Document;

/// Parse an HTML string into a document at `about:blank`
pub fn parse(html: &str) -> HtmlResult<Document> {
    HtmlParser::new().parse(html)
}

/// Result type for markup loading
pub type HtmlResult<T> = Result<T, HtmlError>;

/// Markup loading errors
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read markup: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Dom(#[from] zoomgrid_dom::DomError),
}

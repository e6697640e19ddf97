//! Document - High-level document API

use crate::{DomError, DomResult, DomTree, ElementQuery, NodeId};
use url::Url;

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document location
    location: Url,
}

impl Document {
    /// Create an empty document at `url`
    pub fn new(url: &str) -> DomResult<Self> {
        Ok(Self {
            tree: DomTree::new(),
            location: parse_url(url)?,
        })
    }

    /// Current location
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Navigate within the page (only the location changes)
    pub fn set_location(&mut self, url: &str) -> DomResult<()> {
        self.location = parse_url(url)?;
        tracing::debug!("Location changed to {}", self.location);
        Ok(())
    }

    /// Location fragment without the leading `#`
    pub fn location_fragment(&self) -> Option<&str> {
        self.location.fragment().filter(|f| !f.is_empty())
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&n| self.tree.element(n).is_some_and(|e| e.id.as_deref() == Some(id)))
    }

    /// First element in the document matching `selector`
    pub fn query_selector(&self, selector: &str) -> DomResult<Option<NodeId>> {
        self.tree.query_selector(self.tree.root(), selector)
    }

    /// Every element in the document matching `selector`
    pub fn query_selector_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
        self.tree.query_selector_all(self.tree.root(), selector)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            tree: DomTree::new(),
            location: Url::parse("about:blank").expect("about:blank is a valid URL"),
        }
    }
}

fn parse_url(url: &str) -> DomResult<Url> {
    Url::parse(url).map_err(|source| DomError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_fragment() {
        let mut doc = Document::new("https://example.com/gallery").unwrap();
        assert_eq!(doc.location_fragment(), None);

        doc.set_location("https://example.com/gallery#picture=12").unwrap();
        assert_eq!(doc.location_fragment(), Some("picture=12"));

        doc.set_location("https://example.com/gallery#").unwrap();
        assert_eq!(doc.location_fragment(), None);
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            Document::new("not a url"),
            Err(DomError::InvalidUrl { .. })
        ));
        assert_eq!(Document::default().location().as_str(), "about:blank");
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::default();
        let root = doc.tree.root();
        let div = doc.tree.create_element("div");
        doc.tree.set_attr(div, "id", "picture4").unwrap();
        doc.tree.append_child(root, div).unwrap();

        assert_eq!(doc.get_element_by_id("picture4"), Some(div));
        assert_eq!(doc.get_element_by_id("picture5"), None);
        assert_eq!(doc.query_selector("#picture4").unwrap(), Some(div));
    }
}

//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the arena tree.

use crate::HtmlResult;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use zoomgrid_dom::{Document, DomTree, NodeId};

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document at `about:blank`
    pub fn parse(&self, html: &str) -> HtmlResult<Document> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document location
    pub fn parse_with_url(&self, html: &str, url: &str) -> HtmlResult<Document> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::new(url)?;
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root)?;

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom node (and its children) under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> HtmlResult<()> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attr(id, &attr.name.local, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id)?;
                }
            }
            // Doctype and processing instructions carry nothing a widget reads
            _ => {}
        }
        Ok(())
    }
}

//! zoomgrid DOM - Document Object Model
//!
//! Arena DOM tree with just enough of the browser surface for a widget
//! to drive: selector queries, classes, `data-*` values, inline style,
//! layout offsets, deep cloning and click listeners.

mod classlist;
mod dataset;
mod document;
mod dom_events;
mod element;
mod geometry;
mod node;
mod operations;
mod tree;

pub use classlist::ClassList;
pub use dataset::Dataset;
pub use document::Document;
pub use dom_events::{ClickEvent, EventType, Listener, ListenerId};
pub use element::{CompoundSelector, ElementQuery, Selector, SimpleSelector};
pub use geometry::{DomRect, ElementGeometry};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use operations::{DomError, DomResult};
pub use tree::{Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> Option<usize> {
        self.is_valid().then_some(self.0 as usize)
    }
}

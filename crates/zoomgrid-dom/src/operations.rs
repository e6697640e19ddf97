//! DOM Operation Errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node {0:?} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error: {child:?} cannot be placed under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Element operation on a non-element node
    #[error("Node {0:?} is not an element")]
    InvalidNodeType(NodeId),
    /// Selector could not be parsed
    #[error("Invalid selector: {0:?}")]
    InvalidSelector(String),
    /// Document location could not be parsed
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

//! DOM tree errors

use crate::NodeId;

/// Result type for tree operations
pub type DomResult<T> = Result<T, DomError>;

/// Tree operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found in the arena
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// Child already attached, or parent cannot hold children
    #[error("hierarchy request error: cannot append {child:?} to {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Operation needs an element
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
}

//! Node access errors (no external dependencies)

use thiserror::Error;

/// Discriminant of a [`NodeError`], for callers that branch on the violated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeErrorKind {
    ValueNotPresent,
    ChildrenNotPresent,
}

/// Raised by the non-defaulted readers when the node is not in the required state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeError {
    #[error("value not present: node holds no value")]
    ValueNotPresent,

    #[error("children not present: node holds no children")]
    ChildrenNotPresent,
}

impl NodeError {
    pub fn kind(&self) -> NodeErrorKind {
        match self {
            NodeError::ValueNotPresent => NodeErrorKind::ValueNotPresent,
            NodeError::ChildrenNotPresent => NodeErrorKind::ChildrenNotPresent,
        }
    }
}

/// Result type for node reads.
pub type NodeResult<T> = Result<T, NodeError>;

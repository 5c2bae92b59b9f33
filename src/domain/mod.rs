//! Domain layer: the property tree and its nodes
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod error;
pub mod node;
pub mod traits;
pub mod value;

pub use arena::{
    Ancestors, NodeId, NodeMut, NodeRef, PostOrderIterator, PropertyTree, TreeIterator,
};
pub use error::{NodeError, NodeErrorKind, NodeResult};
pub use node::{Node, NodeState};
pub use traits::{
    BoxedHook, ChildMap, DefaultTraits, HashTraits, Traits, ValueChange, ValueHook,
};
pub use value::{Value, ValueKind};

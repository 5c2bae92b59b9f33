//! ptree: a generic in-memory property tree.
//!
//! Every node has a key, and holds either nothing, a single scalar value, or a
//! set of uniquely keyed children. The shape of a tree (key type, value type,
//! children container, change hook) is fixed at compile time by a [`Traits`]
//! descriptor.
//!
//! ```
//! use ptree::{DefaultTraits, NodeError, PropertyTree, Value};
//!
//! let mut tree: PropertyTree<DefaultTraits<String>> = PropertyTree::new();
//! let mut root = tree.root_mut();
//! root.add_child("server".into())
//!     .add_child_with_value("port".into(), Value::UInt(8080));
//!
//! let server = tree.root_ref().child_node(&"server".into()).unwrap();
//! assert!(server.has_children());
//! assert_eq!(server.value(), Err(NodeError::ValueNotPresent));
//! ```

pub mod config;
pub mod display;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod util;

pub use crate::config::{DisplayConfig, Settings};
pub use display::TreeDisplay;
pub use domain::{
    BoxedHook, ChildMap, DefaultTraits, HashTraits, Node, NodeError, NodeErrorKind, NodeId,
    NodeMut, NodeRef, NodeResult, NodeState, PropertyTree, Traits, Value, ValueChange,
    ValueHook, ValueKind,
};
pub use errors::{ConfigError, PtreeError, PtreeResult};

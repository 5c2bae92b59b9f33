//! Tree node: a key plus either a scalar value or a set of keyed children.

use std::fmt;

use crate::domain::arena::NodeId;
use crate::domain::error::{NodeError, NodeResult};
use crate::domain::traits::{ChildMap, Traits, ValueChange, ValueHook};

/// What a node currently holds. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Empty,
    Value,
    Children,
}

/// Node stored in a [`PropertyTree`](crate::domain::PropertyTree) arena.
///
/// Nodes are only created by the tree (root) or by `add_child`; mutation goes
/// through [`NodeMut`](crate::domain::NodeMut) so the state rules hold.
pub struct Node<T: Traits> {
    key: T::Key,
    value: Option<T::Value>,
    /// Handle of the owning node, None for the root
    parent: Option<NodeId>,
    children: T::Children,
    state: NodeState,
    value_changed: Option<T::Hook>,
}

impl<T: Traits> Node<T> {
    pub(crate) fn new(key: T::Key, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value: None,
            parent,
            children: T::Children::default(),
            state: NodeState::Empty,
            value_changed: None,
        }
    }

    pub fn key(&self) -> &T::Key {
        &self.key
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn has_value(&self) -> bool {
        self.state == NodeState::Value
    }

    pub fn has_children(&self) -> bool {
        self.state == NodeState::Children
    }

    pub fn empty(&self) -> bool {
        self.state == NodeState::Empty
    }

    pub fn value(&self) -> NodeResult<&T::Value> {
        match (&self.state, &self.value) {
            (NodeState::Value, Some(value)) => Ok(value),
            _ => Err(NodeError::ValueNotPresent),
        }
    }

    pub fn value_or<'a>(&'a self, default: &'a T::Value) -> &'a T::Value {
        self.value().unwrap_or(default)
    }

    pub fn children(&self) -> NodeResult<&T::Children> {
        match self.state {
            NodeState::Children => Ok(&self.children),
            _ => Err(NodeError::ChildrenNotPresent),
        }
    }

    pub fn children_or<'a>(&'a self, default: &'a T::Children) -> &'a T::Children {
        self.children().unwrap_or(default)
    }

    pub fn child(&self, key: &T::Key) -> Option<NodeId> {
        self.children.get(key)
    }

    pub fn exist(&self, key: &T::Key) -> bool {
        self.children.contains_key(key)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_value_changed(&self) -> bool {
        self.value_changed.is_some()
    }

    pub(crate) fn child_ids(&self) -> <T::Children as ChildMap<T::Key>>::Ids<'_> {
        self.children.ids()
    }

    pub(crate) fn insert_child(&mut self, key: T::Key, id: NodeId) {
        self.children.insert(key, id);
        self.state = NodeState::Children;
    }

    pub(crate) fn remove_child(&mut self, key: &T::Key) -> Option<NodeId> {
        let removed = self.children.remove(key);
        if removed.is_some() && self.children.is_empty() {
            self.state = NodeState::Empty;
        }
        removed
    }

    /// Detaches all children; the caller releases their subtrees.
    pub(crate) fn take_children(&mut self) -> Vec<NodeId> {
        let ids = self.children.drain_ids();
        if self.state == NodeState::Children {
            self.state = NodeState::Empty;
        }
        ids
    }

    /// Stores `value`; children must already be detached.
    pub(crate) fn store_value(&mut self, value: T::Value) {
        let previous = self.value.replace(value);
        self.state = NodeState::Value;
        self.notify(previous);
    }

    /// Clears the value slot, returning whether a value was held.
    pub(crate) fn reset_value(&mut self) -> bool {
        match self.value.take() {
            Some(previous) => {
                self.state = NodeState::Empty;
                self.notify(Some(previous));
                true
            }
            None => false,
        }
    }

    pub(crate) fn replace_value_changed(&mut self, hook: Option<T::Hook>) -> Option<T::Hook> {
        std::mem::replace(&mut self.value_changed, hook)
    }

    fn notify(&mut self, previous: Option<T::Value>) {
        let Node {
            key,
            value,
            value_changed,
            ..
        } = self;
        if let Some(hook) = value_changed.as_mut() {
            hook.value_changed(
                key,
                ValueChange {
                    previous: previous.as_ref(),
                    current: value.as_ref(),
                },
            );
        }
    }
}

impl<T: Traits> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("state", &self.state)
            .field("value_changed", &self.value_changed.is_some())
            .finish()
    }
}

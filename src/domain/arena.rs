use generational_arena::{Arena, Index};
use std::fmt;
use std::ops::Deref;
use tracing::{debug, instrument, trace};

use crate::domain::node::Node;
use crate::domain::traits::Traits;

/// Handle of a node in a [`PropertyTree`].
///
/// Generational: once the node is destroyed the handle never resolves again,
/// even if its arena slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// Arena-based property tree.
///
/// Owns every node. The root is created with the tree and lives as long as it;
/// all other nodes are created through [`NodeMut::add_child`] and destroyed
/// together with their subtree.
pub struct PropertyTree<T: Traits> {
    /// Arena storage for all tree nodes
    arena: Arena<Node<T>>,
    root: NodeId,
}

impl<T: Traits> Default for PropertyTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Traits> fmt::Debug for PropertyTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTree")
            .field("root", &self.root)
            .field("nodes", &self.arena.len())
            .finish()
    }
}

impl<T: Traits> PropertyTree<T> {
    /// Creates a tree holding a single empty root with the default key.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(Node::new(T::Key::default(), None)));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_ref(&self) -> NodeRef<'_, T> {
        NodeRef {
            tree: self,
            id: self.root,
            node: &self.arena[self.root.0],
        }
    }

    pub fn root_mut(&mut self) -> NodeMut<'_, T> {
        let id = self.root;
        NodeMut { tree: self, id }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.arena.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.arena
            .get(id.0)
            .map(|node| NodeRef { tree: self, id, node })
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, T>> {
        if self.arena.contains(id.0) {
            Some(NodeMut { tree: self, id })
        } else {
            None
        }
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order walk of the subtree rooted at `id` (empty if `id` is stale).
    #[instrument(level = "trace", skip(self))]
    pub fn descendants(&self, id: NodeId) -> TreeIterator<'_, T> {
        TreeIterator::new(self, id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self, self.root)
    }

    /// Number of levels; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.get(idx) {
                max_depth = max_depth.max(depth);
                stack.extend(node.child_ids().map(|child| (child, depth + 1)));
            }
        }
        max_depth
    }

    /// Collects all nodes without children, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|node| node.child_count() == 0)
            .map(|node| node.id())
            .collect()
    }

    #[instrument(level = "trace", skip(self))]
    fn set_value_at(&mut self, id: NodeId, value: T::Value) -> bool {
        let released = self.release_children(id);
        if released > 0 {
            debug!(released, "children discarded by set_value");
        }
        self.arena[id.0].store_value(value);
        true
    }

    #[instrument(level = "trace", skip(self))]
    fn value_reset_at(&mut self, id: NodeId) {
        if self.arena[id.0].reset_value() {
            trace!("value reset");
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn add_child_at(&mut self, id: NodeId, key: T::Key) -> NodeId {
        let parent = &mut self.arena[id.0];
        if let Some(existing) = parent.child(&key) {
            trace!("child exists");
            return existing;
        }
        if parent.reset_value() {
            debug!("value cleared by add_child");
        }
        let child = NodeId(self.arena.insert(Node::new(key.clone(), Some(id))));
        self.arena[id.0].insert_child(key, child);
        child
    }

    #[instrument(level = "trace", skip(self))]
    fn erase_at(&mut self, id: NodeId, key: &T::Key) {
        if let Some(child) = self.arena[id.0].remove_child(key) {
            let released = self.remove_subtree(child);
            debug!(released, "subtree erased");
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn clear_at(&mut self, id: NodeId) {
        let released = self.release_children(id);
        let reset = self.arena[id.0].reset_value();
        trace!(released, reset, "node cleared");
    }

    fn release_children(&mut self, id: NodeId) -> usize {
        let children = self.arena[id.0].take_children();
        children
            .into_iter()
            .map(|child| self.remove_subtree(child))
            .sum()
    }

    /// Removes `id` and its descendants from the arena, children first.
    fn remove_subtree(&mut self, id: NodeId) -> usize {
        let doomed: Vec<NodeId> = PostOrderIterator::new(self, id)
            .map(|node| node.id())
            .collect();
        for idx in &doomed {
            self.arena.remove(idx.0);
        }
        doomed.len()
    }
}

/// Read-only cursor on a live node.
pub struct NodeRef<'a, T: Traits> {
    tree: &'a PropertyTree<T>,
    id: NodeId,
    node: &'a Node<T>,
}

impl<T: Traits> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Traits> Copy for NodeRef<'_, T> {}

impl<T: Traits> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.id).field(self.node).finish()
    }
}

impl<T: Traits> Deref for NodeRef<'_, T> {
    type Target = Node<T>;

    fn deref(&self) -> &Node<T> {
        self.node
    }
}

impl<'a, T: Traits> NodeRef<'a, T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a Node<T> {
        self.node
    }

    pub fn tree(&self) -> &'a PropertyTree<T> {
        self.tree
    }

    pub fn is_root(&self) -> bool {
        self.id == self.tree.root
    }

    pub fn parent_node(&self) -> Option<NodeRef<'a, T>> {
        self.node.parent().and_then(|id| self.tree.node(id))
    }

    pub fn child_node(&self, key: &T::Key) -> Option<NodeRef<'a, T>> {
        self.node.child(key).and_then(|id| self.tree.node(id))
    }

    /// Direct children in container order.
    pub fn child_nodes(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        let tree = self.tree;
        self.node
            .child_ids()
            .filter_map(move |id| tree.node(id))
    }

    /// True if `child` is a live direct child of this node.
    pub fn exist_node(&self, child: NodeId) -> bool {
        self.tree
            .get(child)
            .is_some_and(|node| node.parent() == Some(self.id))
    }

    /// Walks parent handles up to the root, nearest first.
    pub fn ancestors(&self) -> Ancestors<'a, T> {
        Ancestors {
            tree: self.tree,
            next: self.node.parent(),
        }
    }

    /// Keys from the root's child down to this node; empty for the root.
    pub fn key_path(&self) -> Vec<T::Key> {
        let mut path: Vec<T::Key> = std::iter::once(*self)
            .chain(self.ancestors())
            .filter(|node| !node.is_root())
            .map(|node| node.key().clone())
            .collect();
        path.reverse();
        path
    }

    pub fn descendants(&self) -> TreeIterator<'a, T> {
        TreeIterator::new(self.tree, self.id)
    }
}

/// Mutating cursor on a live node.
///
/// Holds the tree exclusively, so the node cannot be destroyed underneath it.
pub struct NodeMut<'a, T: Traits> {
    tree: &'a mut PropertyTree<T>,
    id: NodeId,
}

impl<T: Traits> fmt::Debug for NodeMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeMut").field(&self.id).field(&**self).finish()
    }
}

impl<T: Traits> Deref for NodeMut<'_, T> {
    type Target = Node<T>;

    fn deref(&self) -> &Node<T> {
        &self.tree.arena[self.id.0]
    }
}

impl<'a, T: Traits> NodeMut<'a, T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &PropertyTree<T> {
        &*self.tree
    }

    pub fn as_node_ref(&self) -> NodeRef<'_, T> {
        NodeRef {
            tree: &*self.tree,
            id: self.id,
            node: &self.tree.arena[self.id.0],
        }
    }

    pub fn exist_node(&self, child: NodeId) -> bool {
        self.as_node_ref().exist_node(child)
    }

    /// Stores `value`, destroying any children first. Always succeeds.
    pub fn set_value(&mut self, value: T::Value) -> bool {
        self.tree.set_value_at(self.id, value)
    }

    pub fn value_reset(&mut self) {
        self.tree.value_reset_at(self.id)
    }

    /// Returns the child registered under `key`, creating an empty one if absent.
    ///
    /// Creating a child clears any value this node holds.
    pub fn add_child(&mut self, key: T::Key) -> NodeMut<'_, T> {
        let id = self.tree.add_child_at(self.id, key);
        NodeMut {
            tree: &mut *self.tree,
            id,
        }
    }

    pub fn add_child_with_value(&mut self, key: T::Key, value: T::Value) -> NodeMut<'_, T> {
        let mut child = self.add_child(key);
        child.set_value(value);
        child
    }

    pub fn child_mut(&mut self, key: &T::Key) -> Option<NodeMut<'_, T>> {
        let id = self.child(key)?;
        Some(NodeMut {
            tree: &mut *self.tree,
            id,
        })
    }

    pub fn into_child(self, key: &T::Key) -> Option<NodeMut<'a, T>> {
        let id = self.child(key)?;
        Some(NodeMut {
            tree: self.tree,
            id,
        })
    }

    pub fn into_parent(self) -> Option<NodeMut<'a, T>> {
        let id = self.parent()?;
        Some(NodeMut {
            tree: self.tree,
            id,
        })
    }

    /// Destroys the subtree under `key`; no-op if there is no such child.
    pub fn erase(&mut self, key: &T::Key) {
        self.tree.erase_at(self.id, key)
    }

    /// Destroys all children and resets the value.
    pub fn clear(&mut self) {
        self.tree.clear_at(self.id)
    }

    /// Installs the value-changed hook, returning the one it replaces.
    pub fn set_value_changed(&mut self, hook: T::Hook) -> Option<T::Hook> {
        self.tree.arena[self.id.0].replace_value_changed(Some(hook))
    }

    pub fn take_value_changed(&mut self) -> Option<T::Hook> {
        self.tree.arena[self.id.0].replace_value_changed(None)
    }
}

/// Parent chain of a node, nearest first.
pub struct Ancestors<'a, T: Traits> {
    tree: &'a PropertyTree<T>,
    next: Option<NodeId>,
}

impl<'a, T: Traits> Iterator for Ancestors<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.next?)?;
        self.next = node.parent();
        Some(node)
    }
}

pub struct TreeIterator<'a, T: Traits> {
    tree: &'a PropertyTree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T: Traits> TreeIterator<'a, T> {
    fn new(tree: &'a PropertyTree<T>, start: NodeId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a, T: Traits> Iterator for TreeIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.child_ids().rev());
                return Some(node);
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T: Traits> {
    tree: &'a PropertyTree<T>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T: Traits> PostOrderIterator<'a, T> {
    fn new(tree: &'a PropertyTree<T>, start: NodeId) -> Self {
        Self {
            tree,
            stack: vec![(start, false)],
        }
    }
}

impl<'a, T: Traits> Iterator for PostOrderIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                if !visited {
                    self.stack.push((current, true));
                    self.stack
                        .extend(node.child_ids().rev().map(|child| (child, false)));
                } else {
                    return Some(node);
                }
            }
        }
        None
    }
}

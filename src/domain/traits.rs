//! Compile-time descriptor fixing the key, value, container and hook types of a tree.

use std::collections::{btree_map, BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::Copied;
use std::marker::PhantomData;

use crate::domain::arena::NodeId;
use crate::domain::value::Value;

/// Mapping from child key to the child's handle.
///
/// The container only stores handles; the nodes themselves live in the tree's arena.
pub trait ChildMap<K>: Default + Debug {
    /// Borrowing iterator over the stored handles, in container order.
    type Ids<'a>: DoubleEndedIterator<Item = NodeId>
    where
        Self: 'a;

    fn get(&self, key: &K) -> Option<NodeId>;

    /// Registers `id` under `key`, returning the handle previously stored there.
    fn insert(&mut self, key: K, id: NodeId) -> Option<NodeId>;

    fn remove(&mut self, key: &K) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn ids(&self) -> Self::Ids<'_>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the container and returns the handles it held.
    fn drain_ids(&mut self) -> Vec<NodeId> {
        let ids = self.ids().collect();
        *self = Self::default();
        ids
    }
}

impl<K: Ord + Debug> ChildMap<K> for BTreeMap<K, NodeId> {
    type Ids<'a>
        = Copied<btree_map::Values<'a, K, NodeId>>
    where
        Self: 'a;

    fn get(&self, key: &K) -> Option<NodeId> {
        BTreeMap::get(self, key).copied()
    }

    fn insert(&mut self, key: K, id: NodeId) -> Option<NodeId> {
        BTreeMap::insert(self, key, id)
    }

    fn remove(&mut self, key: &K) -> Option<NodeId> {
        BTreeMap::remove(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn ids(&self) -> Self::Ids<'_> {
        self.values().copied()
    }
}

impl<K: Eq + Hash + Debug> ChildMap<K> for HashMap<K, NodeId> {
    type Ids<'a>
        = std::vec::IntoIter<NodeId>
    where
        Self: 'a;

    fn get(&self, key: &K) -> Option<NodeId> {
        HashMap::get(self, key).copied()
    }

    fn insert(&mut self, key: K, id: NodeId) -> Option<NodeId> {
        HashMap::insert(self, key, id)
    }

    fn remove(&mut self, key: &K) -> Option<NodeId> {
        HashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn ids(&self) -> Self::Ids<'_> {
        // hash_map::Values is not double-ended; snapshot handles in iteration order
        self.values().copied().collect::<Vec<_>>().into_iter()
    }
}

/// Value slot transition reported to a [`ValueHook`].
#[derive(Debug)]
pub struct ValueChange<'a, V> {
    /// Value held before the mutation
    pub previous: Option<&'a V>,
    /// Value held after the mutation, None when the slot was cleared
    pub current: Option<&'a V>,
}

impl<V> ValueChange<'_, V> {
    pub fn is_reset(&self) -> bool {
        self.current.is_none()
    }
}

/// Observer invoked in-line whenever a node's value slot is set or cleared.
pub trait ValueHook<K, V> {
    fn value_changed(&mut self, key: &K, change: ValueChange<'_, V>);
}

impl<K, V, F> ValueHook<K, V> for F
where
    F: FnMut(&K, ValueChange<'_, V>),
{
    fn value_changed(&mut self, key: &K, change: ValueChange<'_, V>) {
        self(key, change)
    }
}

/// Hook type used by the provided descriptors.
pub type BoxedHook<K, V> = Box<dyn FnMut(&K, ValueChange<'_, V>)>;

/// Type-level configuration of a property tree.
pub trait Traits {
    type Key: Clone + Eq + Default + Debug;
    type Value: Clone + PartialEq + Debug;
    type Children: ChildMap<Self::Key>;
    type Hook: ValueHook<Self::Key, Self::Value>;
}

/// Ordered children (`BTreeMap`), boxed-closure hook.
pub struct DefaultTraits<K, V = Value>(PhantomData<fn() -> (K, V)>);

impl<K, V> Traits for DefaultTraits<K, V>
where
    K: Ord + Clone + Default + Debug,
    V: Clone + PartialEq + Debug,
{
    type Key = K;
    type Value = V;
    type Children = BTreeMap<K, NodeId>;
    type Hook = BoxedHook<K, V>;
}

/// Unordered children (`HashMap`), boxed-closure hook.
pub struct HashTraits<K, V = Value>(PhantomData<fn() -> (K, V)>);

impl<K, V> Traits for HashTraits<K, V>
where
    K: Eq + Hash + Clone + Default + Debug,
    V: Clone + PartialEq + Debug,
{
    type Key = K;
    type Value = V;
    type Children = HashMap<K, NodeId>;
    type Hook = BoxedHook<K, V>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arena::PropertyTree;

    fn handles(n: usize) -> Vec<NodeId> {
        let mut tree: PropertyTree<DefaultTraits<String>> = PropertyTree::new();
        (0..n)
            .map(|i| tree.root_mut().add_child(i.to_string()).id())
            .collect()
    }

    #[test]
    fn given_btree_children_when_listing_ids_then_key_order_both_ways() {
        let h = handles(3);
        let mut map: BTreeMap<String, NodeId> = BTreeMap::new();
        ChildMap::insert(&mut map, "c".to_string(), h[2]);
        ChildMap::insert(&mut map, "a".to_string(), h[0]);
        ChildMap::insert(&mut map, "b".to_string(), h[1]);

        assert_eq!(map.ids().collect::<Vec<_>>(), h);
        assert_eq!(map.ids().rev().collect::<Vec<_>>(), vec![h[2], h[1], h[0]]);
    }

    #[test]
    fn given_children_when_drained_then_container_empty() {
        let h = handles(2);
        let mut map: HashMap<String, NodeId> = HashMap::new();
        ChildMap::insert(&mut map, "a".to_string(), h[0]);
        ChildMap::insert(&mut map, "b".to_string(), h[1]);

        let mut drained = map.drain_ids();
        drained.sort_by_key(|id| h.iter().position(|x| x == id));

        assert_eq!(drained, h);
        assert!(ChildMap::is_empty(&map));
        assert_eq!(map.ids().count(), 0);
    }
}

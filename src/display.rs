//! Human-readable rendering of a property tree via termtree.
//!
//! Debug view only: this is not a serialization format and cannot be read back.

use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::config::DisplayConfig;
use crate::domain::{NodeRef, PropertyTree, Traits};

pub trait TreeDisplay {
    fn to_tree_string(&self, config: &DisplayConfig) -> Tree<String>;
}

fn label<T>(node: &NodeRef<'_, T>, config: &DisplayConfig) -> String
where
    T: Traits,
    T::Key: fmt::Display,
    T::Value: fmt::Display,
{
    let key = if node.is_root() {
        config.root_label.clone()
    } else {
        node.key().to_string()
    };
    match node.value() {
        Ok(value) if config.show_values => format!("{} = {}", key, value),
        _ => key,
    }
}

fn build_tree<T>(node: NodeRef<'_, T>, level: usize, config: &DisplayConfig) -> Tree<String>
where
    T: Traits,
    T::Key: fmt::Display,
    T::Value: fmt::Display,
{
    let mut tree = Tree::new(label(&node, config));
    if config.max_depth.map_or(true, |max| level < max) {
        for child in node.child_nodes() {
            tree.push(build_tree(child, level + 1, config));
        }
    }
    tree
}

impl<T> TreeDisplay for NodeRef<'_, T>
where
    T: Traits,
    T::Key: fmt::Display,
    T::Value: fmt::Display,
{
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self, config: &DisplayConfig) -> Tree<String> {
        build_tree(*self, 0, config)
    }
}

impl<T> TreeDisplay for PropertyTree<T>
where
    T: Traits,
    T::Key: fmt::Display,
    T::Value: fmt::Display,
{
    fn to_tree_string(&self, config: &DisplayConfig) -> Tree<String> {
        self.root_ref().to_tree_string(config)
    }
}

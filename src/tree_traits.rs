/*
Outline rendering of a sheet through termtree.

The conversion walks the arena directly under a single borrow instead of going
through Topic handles, so rendering never re-enters the RefCell.
 */
use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{ResourceIndex, Topic};

pub trait TopicTreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TopicTreeConvert for Topic {
    #[instrument(level = "trace")]
    fn to_tree_string(&self) -> Tree<String> {
        self.with_index(|index| {
            if index.contains(self.slot()) {
                build_tree(index, self.slot())
            } else {
                Tree::new("Removed topic".to_string())
            }
        })
    }
}

fn build_tree(index: &ResourceIndex, node_idx: Index) -> Tree<String> {
    let Some(node) = index.get_node(node_idx) else {
        return Tree::new(String::new());
    };
    let leaves: Vec<_> = node
        .children
        .iter()
        .map(|&child| build_tree(index, child))
        .collect();
    Tree::new(node.title.clone()).with_leaves(leaves)
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}

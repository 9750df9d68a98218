//! Box-drawing rendering of a tree for terminal output.
//!
//! Each node shows its value, cached height and balance factor. When a node
//! has exactly one child the missing side is drawn as `·`, so left and right
//! stay distinguishable.

use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::node::{Link, Node};
use crate::domain::tree::AvlTree;

const MISSING_CHILD: &str = "·";

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeRender for AvlTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => build_tree(root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

fn label<T: Display>(node: &Node<T>) -> String {
    format!(
        "{} (h={}, bf={})",
        node.value,
        node.height,
        node.balance_factor()
    )
}

fn build_tree<T: Display>(node: &Node<T>) -> Tree<String> {
    let mut tree = Tree::new(label(node));
    if !node.is_leaf() {
        for child in [&node.left, &node.right] {
            tree.push(build_child(child));
        }
    }
    tree
}

fn build_child<T: Display>(link: &Link<T>) -> Tree<String> {
    match link {
        Some(node) => build_tree(node),
        None => Tree::new(MISSING_CHILD.to_string()),
    }
}

//! Tree node and height bookkeeping

use std::cmp::max;

/// Owned child slot: absent or exclusively owned by the parent.
pub type Link<T> = Option<Box<Node<T>>>;

/// A single stored value with its two owned subtrees.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Stored value, unique within the tree
    pub value: T,
    /// Subtree holding smaller values
    pub left: Link<T>,
    /// Subtree holding larger values
    pub right: Link<T>,
    /// Cached height: 1 + max(height(left), height(right))
    pub height: usize,
}

impl<T> Node<T> {
    /// Creates a leaf node (height 1).
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub fn boxed(value: T) -> Box<Self> {
        Box::new(Self::new(value))
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Refreshes the cached height from the children's cached heights.
    ///
    /// Must be called on every node whose child subtree changed, children
    /// before parents.
    pub fn recompute_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    /// Left height minus right height.
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// Cached height of a slot, 0 when absent. Never descends.
pub fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of a slot, 0 when absent.
pub fn balance_factor<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_node_when_created_then_is_leaf_with_height_one() {
        let node = Node::new(5);
        assert!(node.is_leaf());
        assert_eq!(node.height, 1);
        assert_eq!(node.balance_factor(), 0);
    }

    #[test]
    fn given_absent_link_when_querying_then_height_and_balance_are_zero() {
        let link: Link<i32> = None;
        assert_eq!(height(&link), 0);
        assert_eq!(balance_factor(&link), 0);
    }

    #[test]
    fn given_left_child_when_recomputing_then_height_and_balance_follow() {
        let mut node = Node::new(5);
        node.left = Some(Node::boxed(3));
        node.recompute_height();

        assert_eq!(node.height, 2);
        assert_eq!(node.balance_factor(), 1);
        assert!(!node.is_leaf());
    }
}

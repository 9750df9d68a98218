//! Rotations and the rebalancing policies applied on unwind.
//!
//! Insertion and deletion select the rotation case by different criteria:
//! insertion looks at which side of the heavy child the inserted value fell,
//! deletion only has the heavy child's balance factor to go on.

use std::cmp::Ordering;
use std::fmt;

use tracing::{trace, warn};

use crate::domain::node::{balance_factor, Node};

/// The four classic AVL imbalance shapes, named by the heavy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Left child's left subtree is too tall: single right rotation
    LeftLeft,
    /// Right child's right subtree is too tall: single left rotation
    RightRight,
    /// Left child's right subtree is too tall: left on child, then right
    LeftRight,
    /// Right child's left subtree is too tall: right on child, then left
    RightLeft,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rotation::LeftLeft => "LL",
            Rotation::RightRight => "RR",
            Rotation::LeftRight => "LR",
            Rotation::RightLeft => "RL",
        };
        write!(f, "{name}")
    }
}

/// Promotes `y.left` to subtree root; `y` becomes its right child.
///
/// Returns the subtree unchanged when `y` has no left child.
pub fn rotate_right<T>(mut y: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut x) = y.left.take() else {
        warn!("rotate_right without left child, skipping");
        return y;
    };
    y.left = x.right.take();
    y.recompute_height();
    x.right = Some(y);
    x.recompute_height();
    x
}

/// Promotes `x.right` to subtree root; `x` becomes its left child.
///
/// Returns the subtree unchanged when `x` has no right child.
pub fn rotate_left<T>(mut x: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut y) = x.right.take() else {
        warn!("rotate_left without right child, skipping");
        return x;
    };
    x.right = y.left.take();
    x.recompute_height();
    y.left = Some(x);
    y.recompute_height();
    y
}

/// Performs the rotation(s) for `case` and returns the new subtree root.
pub fn apply<T>(mut node: Box<Node<T>>, case: Rotation) -> Box<Node<T>> {
    trace!(%case, "rotating");
    match case {
        Rotation::LeftLeft => rotate_right(node),
        Rotation::RightRight => rotate_left(node),
        Rotation::LeftRight => {
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        Rotation::RightLeft => {
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
    }
}

/// Picks the case after an insertion below `node`.
///
/// `heavy_step` is the comparison of the inserted value against the value of
/// the child it descended into, recorded on the way down. For a left-heavy
/// node `Less` means the value landed left of `node.left` (LL), `Greater`
/// right of it (LR); mirrored for a right-heavy node.
///
/// An unbalanced node with `heavy_step == Equal` has no insertion case and
/// is left as is with a warning.
pub fn classify_insert<T>(node: &Node<T>, heavy_step: Ordering) -> Option<Rotation> {
    let balance = node.balance_factor();
    let case = if balance > 1 {
        match heavy_step {
            Ordering::Less => Some(Rotation::LeftLeft),
            Ordering::Greater => Some(Rotation::LeftRight),
            Ordering::Equal => None,
        }
    } else if balance < -1 {
        match heavy_step {
            Ordering::Greater => Some(Rotation::RightRight),
            Ordering::Less => Some(Rotation::RightLeft),
            Ordering::Equal => None,
        }
    } else {
        return None;
    };
    if case.is_none() {
        warn!(balance, "unbalanced after insert without a heavy step, skipping");
    }
    case
}

/// Picks the case after a removal below `node`, from the heavy child's balance.
pub fn classify_remove<T>(node: &Node<T>) -> Option<Rotation> {
    let balance = node.balance_factor();
    if balance > 1 {
        if balance_factor(&node.left) >= 0 {
            Some(Rotation::LeftLeft)
        } else {
            Some(Rotation::LeftRight)
        }
    } else if balance < -1 {
        if balance_factor(&node.right) <= 0 {
            Some(Rotation::RightRight)
        } else {
            Some(Rotation::RightLeft)
        }
    } else {
        None
    }
}

/// Refreshes `node`'s height and fixes an insertion imbalance at it.
pub fn rebalance_after_insert<T>(mut node: Box<Node<T>>, heavy_step: Ordering) -> Box<Node<T>> {
    node.recompute_height();
    match classify_insert(&node, heavy_step) {
        Some(case) => apply(node, case),
        None => node,
    }
}

/// Refreshes `node`'s height and fixes a deletion imbalance at it.
pub fn rebalance_after_remove<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.recompute_height();
    match classify_remove(&node) {
        Some(case) => apply(node, case),
        None => node,
    }
}

use std::cmp::{max, Ordering};
use std::fmt;
use tracing::{debug, instrument};

use crate::domain::balancer;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{self, Link, Node};

/// Self-balancing binary search tree of unique, ordered values.
///
/// After every public operation:
/// - every left subtree holds smaller values and every right subtree larger ones
/// - sibling subtree heights differ by at most one
/// - every node's cached height matches its children
///
/// Duplicate inserts and removal of absent values are no-ops.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    /// Root of the tree, None when empty
    root: Link<T>,
    /// Number of stored values
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[instrument(level = "debug", skip(self), fields(len = self.len))]
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn root_value(&self) -> Option<&T> {
        self.root.as_ref().map(|node| &node.value)
    }

    pub(crate) fn root(&self) -> &Link<T> {
        &self.root
    }

    /// Edge count of the longest root-to-leaf path, read from the cached root height.
    ///
    /// An empty tree reports `-1`, a single node `0`.
    pub fn height(&self) -> isize {
        node::height(&self.root) as isize - 1
    }

    /// Node count of the longest root-to-leaf path, recomputed by full descent.
    ///
    /// Ignores cached heights, so `height() == depth() - 1` holds exactly when
    /// the cache is correct. An empty tree has depth 0.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self) -> usize {
        fn calculate_depth<T>(link: &Link<T>) -> usize {
            match link {
                Some(node) => 1 + max(calculate_depth(&node.left), calculate_depth(&node.right)),
                None => 0,
            }
        }
        calculate_depth(&self.root)
    }

    /// Lazy ascending traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    pub fn min(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(&current.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.value)
    }
}

impl<T: Clone> AvlTree<T> {
    /// Collects all values in ascending order.
    pub fn inorder(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Ord> AvlTree<T> {
    /// Adds `value` unless already present. Returns whether the tree changed.
    #[instrument(level = "debug", skip_all)]
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = Self::insert_at(&mut self.root, value).is_some();
        if inserted {
            self.len += 1;
        }
        debug!(inserted, len = self.len, height = self.height(), "insert");
        inserted
    }

    /// Removes `value` if present. Returns whether the tree changed.
    #[instrument(level = "debug", skip_all)]
    pub fn remove(&mut self, value: &T) -> bool {
        let removed = Self::remove_at(&mut self.root, value);
        if removed {
            self.len -= 1;
        }
        debug!(removed, len = self.len, height = self.height(), "remove");
        removed
    }

    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Inserts below `link`, rebalancing every node on the way back up.
    ///
    /// Returns the comparison made at this level (`Equal` when the new node
    /// was placed here), or None for a duplicate. The parent uses it to pick
    /// between the single and double rotation.
    fn insert_at(link: &mut Link<T>, value: T) -> Option<Ordering> {
        let Some(mut node) = link.take() else {
            *link = Some(Node::boxed(value));
            return Some(Ordering::Equal);
        };

        let step = value.cmp(&node.value);
        let below = match step {
            Ordering::Less => Self::insert_at(&mut node.left, value),
            Ordering::Greater => Self::insert_at(&mut node.right, value),
            Ordering::Equal => None,
        };

        *link = Some(match below {
            Some(heavy_step) => balancer::rebalance_after_insert(node, heavy_step),
            None => node,
        });
        below.map(|_| step)
    }

    /// Removes `value` below `link`, rebalancing every node on the way back up.
    fn remove_at(link: &mut Link<T>, value: &T) -> bool {
        let Some(mut node) = link.take() else {
            return false;
        };

        let removed = match value.cmp(&node.value) {
            Ordering::Less => Self::remove_at(&mut node.left, value),
            Ordering::Greater => Self::remove_at(&mut node.right, value),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // the child subtree is already balanced, it simply takes this slot
                (None, None) => return true,
                (Some(child), None) | (None, Some(child)) => {
                    *link = Some(child);
                    return true;
                }
                (Some(left), Some(right)) => {
                    let (rest, successor) = Self::take_min(right);
                    node.value = successor;
                    node.left = Some(left);
                    node.right = rest;
                    true
                }
            },
        };

        *link = Some(if removed {
            balancer::rebalance_after_remove(node)
        } else {
            node
        });
        removed
    }

    /// Detaches the leftmost node of `node`'s subtree.
    ///
    /// Returns the rebalanced remainder and the detached value.
    fn take_min(mut node: Box<Node<T>>) -> (Link<T>, T) {
        match node.left.take() {
            None => {
                let Node { value, right, .. } = *node;
                (right, value)
            }
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                (Some(balancer::rebalance_after_remove(node)), min)
            }
        }
    }
}

impl<T: Ord + fmt::Debug> AvlTree<T> {
    /// Checks ordering, balance, cached heights and the length counter.
    ///
    /// Returns the first violation found in a left-to-right walk.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> DomainResult<()> {
        let (_, counted) = Self::check(&self.root, None, None)?;
        if counted != self.len {
            return Err(DomainError::LengthMismatch {
                reported: self.len,
                counted,
            });
        }
        Ok(())
    }

    /// Returns (actual height, node count) of the subtree at `link`.
    fn check(link: &Link<T>, lower: Option<&T>, upper: Option<&T>) -> DomainResult<(usize, usize)> {
        let Some(node) = link else {
            return Ok((0, 0));
        };

        if let Some(lower) = lower {
            if node.value <= *lower {
                return Err(DomainError::OrderViolation {
                    value: format!("{:?}", node.value),
                    reason: format!("not greater than ancestor {:?}", lower),
                });
            }
        }
        if let Some(upper) = upper {
            if node.value >= *upper {
                return Err(DomainError::OrderViolation {
                    value: format!("{:?}", node.value),
                    reason: format!("not less than ancestor {:?}", upper),
                });
            }
        }

        let (left_height, left_count) = Self::check(&node.left, lower, Some(&node.value))?;
        let (right_height, right_count) = Self::check(&node.right, Some(&node.value), upper)?;

        let actual = 1 + max(left_height, right_height);
        if node.height != actual {
            return Err(DomainError::StaleHeight {
                value: format!("{:?}", node.value),
                cached: node.height,
                actual,
            });
        }

        let balance = left_height as isize - right_height as isize;
        if balance.abs() > 1 {
            return Err(DomainError::Unbalanced {
                value: format!("{:?}", node.value),
                balance,
            });
        }

        Ok((actual, left_count + right_count + 1))
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator driven by an explicit stack of pending ancestors.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a AvlTree<T>) -> Self {
        let mut iter = Self {
            stack: Vec::with_capacity(node::height(&tree.root)),
            remaining: tree.len,
        };
        iter.push_left_spine(tree.root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

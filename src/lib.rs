//! AVL tree library with a small driver CLI.
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut tree: AvlTree<i64> = [10, 20, 30, 40, 50, 25].into_iter().collect();
//! assert_eq!(tree.inorder(), vec![10, 20, 25, 30, 40, 50]);
//! assert_eq!(tree.height(), 2);
//!
//! tree.remove(&30);
//! assert_eq!(tree.root_value(), Some(&40));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{AvlTree, DomainError, TreeRender};

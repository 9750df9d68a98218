//! Domain layer: the balanced tree and its invariants
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod balancer;
pub mod error;
pub mod node;
pub mod render;
pub mod tree;

pub use balancer::Rotation;
pub use error::{DomainError, DomainResult};
pub use node::Node;
pub use render::TreeRender;
pub use tree::{AvlTree, Iter};

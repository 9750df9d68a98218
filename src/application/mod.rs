//! Application layer: services and use cases
//!
//! This layer drives the domain tree on behalf of outer callers.

pub mod error;
pub mod operation;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use operation::{parse_operations, Operation};

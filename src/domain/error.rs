//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural invariant violations reported by `AvlTree::validate`.
///
/// Values are carried pre-formatted so the error does not depend on `T`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("order violated at {value}: {reason}")]
    OrderViolation { value: String, reason: String },

    #[error("node {value} is unbalanced: balance factor {balance}")]
    Unbalanced { value: String, balance: isize },

    #[error("node {value} caches height {cached}, actual {actual}")]
    StaleHeight {
        value: String,
        cached: usize,
        actual: usize,
    },

    #[error("tree reports {reported} values but holds {counted}")]
    LengthMismatch { reported: usize, counted: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

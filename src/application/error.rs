//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors with the operation that exposed them.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("invariant violated after {operation}: {source}")]
    Invariant {
        operation: String,
        #[source]
        source: DomainError,
    },

    #[error("invalid operation '{token}': {reason}")]
    InvalidOperation { token: String, reason: String },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

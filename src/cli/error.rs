//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::InvalidOperation { .. } => crate::exitcode::USAGE,
                ApplicationError::Invariant { .. } => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_error_kinds_when_mapping_then_uses_sysexits_codes() {
        let usage = CliError::Usage("no command".into());
        let invalid = CliError::from(ApplicationError::InvalidOperation {
            token: "x".into(),
            reason: "bad".into(),
        });
        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        let invariant = CliError::from(ApplicationError::Invariant {
            operation: "-5".into(),
            source: DomainError::LengthMismatch {
                reported: 1,
                counted: 0,
            },
        });

        assert_eq!(usage.exit_code(), crate::exitcode::USAGE);
        assert_eq!(invalid.exit_code(), crate::exitcode::USAGE);
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);
        assert_eq!(invariant.exit_code(), crate::exitcode::DATAERR);
        assert!(invariant.to_string().starts_with("invariant violated after -5:"));
    }
}

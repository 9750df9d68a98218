//! Operation tokens accepted by the driver
//!
//! - `+N` or `N` inserts N
//! - `-N` removes N
//!
//! The sign prefix is stripped once, so `+-3` inserts -3 and `--3` removes -3.

use std::fmt;
use std::str::FromStr;

use crate::application::{ApplicationError, ApplicationResult};

/// A single tree mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert(i64),
    Remove(i64),
}

impl Operation {
    pub fn value(&self) -> i64 {
        match self {
            Operation::Insert(v) | Operation::Remove(v) => *v,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert(v) => write!(f, "+{v}"),
            Operation::Remove(v) => write!(f, "-{v}"),
        }
    }
}

impl FromStr for Operation {
    type Err = ApplicationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(invalid(token, "empty token"));
        }

        let (remove, digits) = if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else {
            (false, trimmed)
        };

        let value = digits
            .parse::<i64>()
            .map_err(|e| invalid(token, &e.to_string()))?;
        Ok(if remove {
            Operation::Remove(value)
        } else {
            Operation::Insert(value)
        })
    }
}

fn invalid(token: &str, reason: &str) -> ApplicationError {
    ApplicationError::InvalidOperation {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses every token, failing on the first malformed one.
pub fn parse_operations<I, S>(tokens: I) -> ApplicationResult<Vec<Operation>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| token.as_ref().parse())
        .collect()
}

//! Tree session service
//!
//! Applies operation sequences to an `AvlTree<i64>` and summarizes the result.

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::operation::Operation;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::AvlTree;

/// Values inserted by the demonstration run.
pub const DEMO_VALUES: [i64; 6] = [10, 20, 30, 40, 50, 25];

/// Snapshot of a tree after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Values in ascending order
    pub values: Vec<i64>,
    /// Edge-count height, -1 when empty
    pub height: isize,
    /// Operations that changed the tree
    pub changed: usize,
    /// Duplicate inserts and removals of absent values
    pub skipped: usize,
}

impl Report {
    /// In-order values joined by `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.values.iter().join(separator)
    }
}

/// Owns one tree and applies operations to it.
#[derive(Debug, Default)]
pub struct TreeService {
    tree: AvlTree<i64>,
    /// Validate all invariants after every operation
    check_invariants: bool,
    changed: usize,
    skipped: usize,
}

impl TreeService {
    pub fn new(check_invariants: bool) -> Self {
        Self {
            check_invariants,
            ..Self::default()
        }
    }

    pub fn tree(&self) -> &AvlTree<i64> {
        &self.tree
    }

    /// Applies one operation. Returns whether the tree changed.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, operation: Operation) -> ApplicationResult<bool> {
        let changed = match operation {
            Operation::Insert(value) => self.tree.insert(value),
            Operation::Remove(value) => self.tree.remove(&value),
        };
        if changed {
            self.changed += 1;
        } else {
            self.skipped += 1;
            debug!(%operation, "no-op");
        }

        if self.check_invariants {
            self.tree
                .validate()
                .map_err(|source| ApplicationError::Invariant {
                    operation: operation.to_string(),
                    source,
                })?;
        }
        Ok(changed)
    }

    /// Applies `operations` in order and returns the resulting report.
    #[instrument(level = "debug", skip_all, fields(count = operations.len()))]
    pub fn run(&mut self, operations: &[Operation]) -> ApplicationResult<Report> {
        for operation in operations {
            self.apply(*operation)?;
        }
        let report = self.report();
        info!(
            len = report.values.len(),
            height = report.height,
            changed = report.changed,
            skipped = report.skipped,
            "run complete"
        );
        Ok(report)
    }

    pub fn report(&self) -> Report {
        Report {
            values: self.tree.inorder(),
            height: self.tree.height(),
            changed: self.changed,
            skipped: self.skipped,
        }
    }
}

/// Insert operations for each of `values`, in order.
pub fn insert_all(values: &[i64]) -> Vec<Operation> {
    values.iter().copied().map(Operation::Insert).collect()
}

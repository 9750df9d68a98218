//! Application services

pub mod tree;

pub use tree::{insert_all, Report, TreeService, DEMO_VALUES};

//! ID3 decision tree induction.
//!
//! The [`domain`] layer holds the induction engine: entropy and gain,
//! per-attribute statistics, dataset filtering and the recursive builder.
//! The remaining layers load dataset files, export trees as JSON and
//! expose everything through the `oaktree` command line.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{build_tree, Dataset, DecisionTree, DomainError, TreeBuilder};

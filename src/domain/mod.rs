//! Domain layer: dataset model and ID3 induction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod aggregate;
pub mod arena;
pub mod builder;
pub mod dataset;
pub mod error;
pub mod export;
pub mod observer;
pub mod parser;
pub mod stats;

pub use aggregate::{AttributeStats, SubsetStats, ValueStats};
pub use arena::{DecisionTree, NodeKind, TreeNode};
pub use builder::{build_tree, TreeBuilder};
pub use dataset::{AttributeDef, AttributeKind, Dataset, Example, ExampleValues};
pub use error::{DomainError, DomainResult, ParseError};
pub use export::{SubsetSummary, TreeExport};
pub use observer::{BuildEvent, BuildObserver, NoopObserver, RecordingObserver, TracingObserver};
pub use parser::parse_dataset;
pub use stats::{entropy, gain, BranchMeasure};

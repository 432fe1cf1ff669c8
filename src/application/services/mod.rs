//! Application services

mod training;

pub use training::{TrainingOutput, TrainingService};

//! Application layer: dataset files in, trees and JSON exports out.
//!
//! Storage goes through [`crate::infrastructure::traits::FileSystem`].

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;

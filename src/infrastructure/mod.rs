//! Infrastructure layer: disk access and service wiring.

pub mod di;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};

//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, ParseError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid dataset {path}: {source}")]
    InvalidDataset {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("training on {path} failed: {source}")]
    Training {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("no *{suffix} datasets found in {dir}")]
    NoDatasets { dir: PathBuf, suffix: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

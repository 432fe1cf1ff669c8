//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while reading the flat-text dataset format.
///
/// Line numbers are 1-based and count only non-blank lines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: missing {section}")]
    MissingSection { line: usize, section: &'static str },

    #[error("line {line}: invalid {what} count: {value:?}")]
    InvalidCount {
        line: usize,
        what: &'static str,
        value: String,
    },

    #[error("line {line}: expected {expected} targets but found {found}")]
    TargetCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: duplicate target {target:?}")]
    DuplicateTarget { line: usize, target: String },

    #[error("line {line}: attribute line needs a name and a value count")]
    MalformedAttribute { line: usize },

    #[error("line {line}: incorrect number of values for {attribute}: expected {expected} but found {found}")]
    ValueCountMismatch {
        line: usize,
        attribute: String,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: duplicate attribute {attribute:?}")]
    DuplicateAttribute { line: usize, attribute: String },

    #[error("line {line}: expected {expected} attribute values and one target, got {found} fields")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid target {target:?}")]
    InvalidTarget { line: usize, target: String },

    #[error("line {line}: invalid value {value:?} for attribute {attribute}")]
    InvalidValue {
        line: usize,
        attribute: String,
        value: String,
    },

    #[error("line {line}: invalid real value {value:?} for attribute {attribute}")]
    InvalidReal {
        line: usize,
        attribute: String,
        value: String,
    },

    #[error("line {line}: attribute {attribute} mixes real and enumerated attributes in one dataset")]
    HybridExample { line: usize, attribute: String },
}

/// Domain errors represent data or invariant violations during induction.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("attribute not found: {attribute} (filtering on value {value:?})")]
    MissingAttribute { attribute: String, value: String },

    #[error("attribute {attribute} is real-valued and cannot be split on")]
    NotSplittable { attribute: String },

    #[error("invalid recursion at {path}: {reason}")]
    InvalidRecursion { reason: String, path: String },

    #[error("building {path}: {source}")]
    Branch {
        path: String,
        #[source]
        source: Box<DomainError>,
    },

    #[error("no branch for value {value:?} of attribute {attribute}")]
    UnknownValue { attribute: String, value: String },

    #[error("expected {expected} attribute values, got {found}")]
    ExampleArity { expected: usize, found: usize },

    #[error("tree has no root node")]
    EmptyTree,

    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

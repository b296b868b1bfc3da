use thiserror::Error;

use crate::tag::TypeTag;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A mandatory document field is absent.
    #[error("document is missing mandatory field '{field}'")]
    MissingField { field: &'static str },

    /// A mandatory document field holds a value of the wrong shape.
    #[error("document field '{field}' is not a {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// A tagged value's recorded type does not match the requested kind.
    #[error("type tag mismatch: expected {expected}, found {actual}")]
    TagMismatch { expected: TypeTag, actual: TypeTag },

    /// A tagged encoding was requested for a value that does not
    /// canonicalize to a mapping.
    #[error("value does not canonicalize to a mapping; cannot carry a type tag")]
    NotAMapping,

    /// Invalid identifier text.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;

use thiserror::Error;

use crate::location::Location;

/// Errors produced by tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// No value exists at the given location.
    #[error("no value at location {0}")]
    PathNotFound(Location),

    /// A dotted path tried to descend through a non-container value.
    #[error("cannot descend into non-container value at '{0}'")]
    NotAContainer(String),
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

use thiserror::Error;

/// Errors produced by collection operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// An upserted record is missing one of its key fields.
    #[error("record is missing key field '{field}'")]
    MissingKeyField { field: String },

    /// A projection named conflicting field paths.
    #[error("invalid projection: {0}")]
    Projection(String),

    /// Failure reported by the backing implementation.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

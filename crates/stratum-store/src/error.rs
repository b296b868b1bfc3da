use thiserror::Error;

/// Errors produced by hybrid store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Conflicting or incomplete store specification. Raised at
    /// construction, before any I/O.
    #[error("store configuration error: {0}")]
    Config(String),

    /// A uuid with no documents was asked for its output.
    #[error("no documents found for uuid '{uuid}'")]
    NotFound { uuid: String },

    /// Identity or serialization failure on a document or value.
    #[error("type error: {0}")]
    Type(#[from] stratum_types::TypeError),

    /// Location algebra failure while editing a document tree.
    #[error("tree error: {0}")]
    Tree(#[from] stratum_tree::TreeError),

    /// Failure reported by a backing collection.
    #[error("collection error: {0}")]
    Collection(#[from] stratum_collection::CollectionError),
}

/// Result alias for hybrid store operations.
pub type StoreResult<T> = Result<T, StoreError>;

//! Hybrid document/blob store.
//!
//! A [`HybridStore`] pushes and pulls documents across two backing
//! collections: small metadata documents live in the document collection,
//! while large embedded values are offloaded to the blob collection at
//! write time, leaving an inline [reference stub](stub) at the value's
//! original nested position. At read time a [`LoadSpec`] decides which
//! stubs to resolve back into their values; everything else comes back
//! as-is, unresolved.
//!
//! The two collections are coordinated, not transactional: upserts on each
//! side are idempotent, so a failed batch is safe to retry wholesale, but a
//! failure between the two upserts leaves one collection ahead of the other
//! until the retry lands.
//!
//! # Modules
//!
//! - [`config`] — [`SaveSpec`]/[`LoadSpec`] offload and resolution rules
//! - [`stub`] — Reference stub codec and blob records
//! - [`write`] — Write pipeline: blob extraction and staging
//! - [`read`] — Read pipeline: lazy stub resolution
//! - [`store`] — The [`HybridStore`] facade
//! - [`error`] — Error types for store operations

pub mod config;
pub mod error;
pub mod read;
pub mod store;
pub mod stub;
pub mod write;

pub use config::{LoadSpec, SaveSpec, Selector, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use read::Resolved;
pub use store::{HybridStore, HybridStoreBuilder, Select, OUTPUT_FIELD};
pub use stub::{is_stub, BlobRecord, Stub, DATA_FIELD, OWNER_INDEX_FIELD, OWNER_UUID_FIELD, STUB_KEY};

// Re-export the types callers need to talk to a store.
pub use stratum_collection::{
    Collection, Criteria, InMemoryCollection, Order, QueryOptions, SortKey,
};
pub use stratum_types::{BlobId, DocKey, TypeTag, INDEX_FIELD, UUID_FIELD};

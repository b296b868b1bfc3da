//! Collection capability contract for Stratum.
//!
//! A Stratum hybrid store coordinates two backing collections (one for
//! documents, one for blobs) and consumes each only through the minimal
//! [`Collection`] trait defined here. Backends own their own connection
//! handling, retries, and timeouts; the contract is synchronous and
//! blocking.
//!
//! # Modules
//!
//! - [`criteria`] — Conjunctive filters over dotted field paths
//! - [`query`] — Sort keys, projections, and query options
//! - [`traits`] — The [`Collection`] trait
//! - [`memory`] — In-memory [`InMemoryCollection`] for tests and embedding
//! - [`error`] — Error types for collection operations

pub mod criteria;
pub mod error;
pub mod memory;
pub mod query;
pub mod traits;

pub use criteria::{Clause, Criteria};
pub use error::{CollectionError, CollectionResult};
pub use memory::InMemoryCollection;
pub use query::{project, sort_documents, Order, QueryOptions, SortKey};
pub use traits::Collection;

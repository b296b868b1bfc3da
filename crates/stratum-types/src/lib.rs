//! Foundation types for Stratum.
//!
//! This crate provides the identity and tagging types used throughout the
//! Stratum hybrid document/blob store.
//!
//! # Key Types
//!
//! - [`BlobId`] — Opaque, globally-unique identifier for an offloaded value
//! - [`DocKey`] — The `(uuid, index)` logical identity of a document revision
//! - [`TypeTag`] — Rich-object type tag recorded alongside offloaded values
//! - [`Tagged`] — Capability trait for kinds with canonical tagged encodings

pub mod canonical;
pub mod error;
pub mod id;
pub mod tag;

pub use canonical::{from_canonical, from_tagged_value, to_canonical, to_tagged_value, Tagged};
pub use error::{TypeError, TypeResult};
pub use id::{BlobId, DocKey, INDEX_FIELD, UUID_FIELD};
pub use tag::{TypeTag, TAG_CLASS_KEY, TAG_MODULE_KEY};

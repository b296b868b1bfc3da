//! The reference stub codec.
//!
//! When a value is offloaded, the exact tree position it occupied receives
//! a stub: a small mapping carrying the minted blob identifier and the
//! value's recorded type tag. Stubs are recognized by the [`STUB_KEY`]
//! sentinel alone, independent of the field name they were saved under, so
//! the read pipeline can find every offloaded position in a document it
//! knows nothing about.

use serde_json::{json, Value};
use stratum_types::{BlobId, DocKey, TypeTag, TAG_CLASS_KEY, TAG_MODULE_KEY};

/// Sentinel key identifying a reference stub, and the blob collection's
/// primary key field.
pub const STUB_KEY: &str = "blob_id";

/// Blob record field holding the offloaded value.
pub const DATA_FIELD: &str = "data";

/// Blob record field naming the owning document's uuid.
pub const OWNER_UUID_FIELD: &str = "owner_uuid";

/// Blob record field naming the owning document's index.
pub const OWNER_INDEX_FIELD: &str = "owner_index";

/// Inline placeholder left where a value was offloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stub {
    pub blob_id: BlobId,
    pub tag: TypeTag,
}

impl Stub {
    /// Mint a stub for a canonical value: a fresh globally-unique blob id,
    /// plus the value's recorded type tag (empty when the value carries no
    /// type metadata).
    pub fn make(value: &Value) -> Self {
        Self {
            blob_id: BlobId::new(),
            tag: TypeTag::of_value(value),
        }
    }

    /// The inline mapping stored at the offloaded position.
    pub fn to_value(&self) -> Value {
        json!({
            STUB_KEY: self.blob_id.to_string(),
            TAG_MODULE_KEY: self.tag.module.clone(),
            TAG_CLASS_KEY: self.tag.class.clone(),
        })
    }

    /// Decode a stub from its inline mapping, if `value` is one.
    pub fn of_value(value: &Value) -> Option<Self> {
        let id = value.get(STUB_KEY)?.as_str()?;
        Some(Self {
            blob_id: BlobId::parse(id).ok()?,
            tag: TypeTag::of_value(value),
        })
    }
}

/// Recognize the stub shape by its sentinel key.
pub fn is_stub(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key(STUB_KEY))
}

/// One record of the blob collection: an offloaded value plus the identity
/// of the document revision that owns it.
///
/// A blob is owned by exactly one document and referenced by exactly one
/// stub; there is no content deduplication.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobRecord {
    pub blob_id: BlobId,
    pub data: Value,
    pub owner: DocKey,
    pub tag: TypeTag,
}

impl BlobRecord {
    pub fn new(stub: &Stub, data: Value, owner: DocKey) -> Self {
        Self {
            blob_id: stub.blob_id,
            data,
            owner,
            tag: stub.tag.clone(),
        }
    }

    /// The persisted record layout, with the tag flattened into the
    /// canonical metadata keys.
    pub fn to_value(&self) -> Value {
        json!({
            STUB_KEY: self.blob_id.to_string(),
            DATA_FIELD: self.data.clone(),
            OWNER_UUID_FIELD: self.owner.uuid.clone(),
            OWNER_INDEX_FIELD: self.owner.index,
            TAG_MODULE_KEY: self.tag.module.clone(),
            TAG_CLASS_KEY: self.tag.class.clone(),
        })
    }
}

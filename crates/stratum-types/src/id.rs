use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::TypeError;

/// Field name carrying a document's stable logical identity.
pub const UUID_FIELD: &str = "uuid";

/// Field name carrying a document's revision number within a uuid.
pub const INDEX_FIELD: &str = "index";

/// Opaque, globally-unique identifier for an offloaded value.
///
/// A `BlobId` is minted once when a value is offloaded and never reused.
/// Identifiers are UUID v7, so ids minted later sort after ids minted
/// earlier; useful when scanning the blob collection, but nothing in
/// Stratum depends on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobId(Uuid);

impl BlobId {
    /// Mint a fresh, globally-unique identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse from the canonical hyphenated string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidId(e.to_string()))
    }
}

impl Default for BlobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.0)
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlobId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The `(uuid, index)` logical identity of one document revision.
///
/// `uuid` names the logical record; `index` is the monotonically assigned
/// revision number within it. The pair is globally unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocKey {
    pub uuid: String,
    pub index: u64,
}

impl DocKey {
    pub fn new(uuid: impl Into<String>, index: u64) -> Self {
        Self {
            uuid: uuid.into(),
            index,
        }
    }

    /// Extract the identity of a document tree.
    ///
    /// Fails when either mandatory field is absent or ill-typed. Offload
    /// requires identity: a blob record must name its owning revision.
    pub fn of_value(doc: &Value) -> Result<Self, TypeError> {
        let uuid = match doc.get(UUID_FIELD) {
            None => return Err(TypeError::MissingField { field: UUID_FIELD }),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(TypeError::InvalidField {
                    field: UUID_FIELD,
                    expected: "string",
                })
            }
        };
        let index = match doc.get(INDEX_FIELD) {
            None => return Err(TypeError::MissingField { field: INDEX_FIELD }),
            Some(v) => v.as_u64().ok_or(TypeError::InvalidField {
                field: INDEX_FIELD,
                expected: "non-negative integer",
            })?,
        };
        Ok(Self { uuid, index })
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.uuid, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_ids_are_unique() {
        let a = BlobId::new();
        let b = BlobId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_string_roundtrip() {
        let id = BlobId::new();
        let parsed = BlobId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_garbage() {
        assert!(BlobId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = BlobId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: BlobId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn dockey_of_value() {
        let doc = json!({"uuid": "abc", "index": 3, "output": 1});
        let key = DocKey::of_value(&doc).unwrap();
        assert_eq!(key, DocKey::new("abc", 3));
    }

    #[test]
    fn dockey_missing_uuid() {
        let doc = json!({"index": 3});
        assert_eq!(
            DocKey::of_value(&doc),
            Err(TypeError::MissingField { field: UUID_FIELD })
        );
    }

    #[test]
    fn dockey_missing_index() {
        let doc = json!({"uuid": "abc"});
        assert_eq!(
            DocKey::of_value(&doc),
            Err(TypeError::MissingField { field: INDEX_FIELD })
        );
    }

    #[test]
    fn dockey_rejects_wrong_shapes() {
        assert!(DocKey::of_value(&json!({"uuid": 1, "index": 3})).is_err());
        assert!(DocKey::of_value(&json!({"uuid": "abc", "index": -1})).is_err());
        assert!(DocKey::of_value(&json!({"uuid": "abc", "index": "x"})).is_err());
    }

    #[test]
    fn dockey_display() {
        assert_eq!(DocKey::new("abc", 2).to_string(), "abc@2");
    }
}

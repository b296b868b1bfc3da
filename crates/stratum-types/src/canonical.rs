//! Canonical encoding of values into plain nested JSON trees.
//!
//! Stratum persists documents as JSON-shaped trees. Plain values go through
//! [`to_canonical`]/[`from_canonical`]. Rich kinds that want read-time
//! filtering by type implement [`Tagged`]: their canonical form is a mapping
//! carrying the `(module, class)` tag inline as metadata keys, and decode
//! verifies the recorded tag before deserializing. The set of `Tagged`
//! impls is a capability registry, not runtime reflection.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{TypeError, TypeResult};
use crate::tag::{TypeTag, TAG_CLASS_KEY, TAG_MODULE_KEY};

/// A serializable kind with a canonical tagged encoding.
///
/// Implementors declare their `(module, class)` tag once; encode and decode
/// carry and verify it. The tag must stay stable across releases: it is
/// persisted inside documents and blob records.
pub trait Tagged: Serialize + DeserializeOwned {
    /// The type tag recorded on canonical encodings of this kind.
    fn type_tag() -> TypeTag;
}

/// Canonicalize a plain value into a JSON tree.
pub fn to_canonical<T: Serialize>(value: &T) -> TypeResult<Value> {
    serde_json::to_value(value).map_err(|e| TypeError::Serialization(e.to_string()))
}

/// Decode a plain value from its canonical JSON tree.
pub fn from_canonical<T: DeserializeOwned>(value: Value) -> TypeResult<T> {
    serde_json::from_value(value).map_err(|e| TypeError::Serialization(e.to_string()))
}

/// Canonicalize a rich value, embedding its type tag as metadata keys.
///
/// Fails with [`TypeError::NotAMapping`] when the kind does not serialize
/// to a mapping: only mappings can carry metadata keys.
pub fn to_tagged_value<T: Tagged>(value: &T) -> TypeResult<Value> {
    let mut canonical = to_canonical(value)?;
    let Some(map) = canonical.as_object_mut() else {
        return Err(TypeError::NotAMapping);
    };
    let tag = T::type_tag();
    map.insert(TAG_MODULE_KEY.to_string(), Value::String(tag.module));
    map.insert(TAG_CLASS_KEY.to_string(), Value::String(tag.class));
    Ok(canonical)
}

/// Decode a rich value from its tagged canonical form.
///
/// The recorded tag must match `T`'s declared tag exactly; a mismatch is
/// [`TypeError::TagMismatch`], never a silent coercion.
pub fn from_tagged_value<T: Tagged>(value: Value) -> TypeResult<T> {
    let actual = TypeTag::of_value(&value);
    let expected = T::type_tag();
    if actual != expected {
        return Err(TypeError::TagMismatch { expected, actual });
    }
    let mut value = value;
    if let Some(map) = value.as_object_mut() {
        map.remove(TAG_MODULE_KEY);
        map.remove(TAG_CLASS_KEY);
    }
    from_canonical(value)
}

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical metadata key recording the module path of a rich value.
pub const TAG_MODULE_KEY: &str = "@module";

/// Canonical metadata key recording the type name of a rich value.
pub const TAG_CLASS_KEY: &str = "@class";

/// Rich-object type tag: a `(module, class)` pair.
///
/// Canonical encodings of rich values carry their tag inline as the
/// [`TAG_MODULE_KEY`]/[`TAG_CLASS_KEY`] metadata keys. Values without
/// recognizable metadata get the [empty](TypeTag::empty) tag. Tags drive
/// read-time filtering: a load selector can name a tag to resolve only
/// offloaded values of that kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeTag {
    pub module: String,
    pub class: String,
}

impl TypeTag {
    pub fn new(module: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            class: class.into(),
        }
    }

    /// The no-tag value, recorded for values without type metadata.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if this is the empty tag.
    pub fn is_empty(&self) -> bool {
        self.module.is_empty() && self.class.is_empty()
    }

    /// Read the tag recorded on a canonical value.
    ///
    /// Returns the recorded `(module, class)` pair when `value` is a
    /// mapping carrying both metadata keys as strings, else the empty tag.
    pub fn of_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::empty();
        };
        match (
            map.get(TAG_MODULE_KEY).and_then(Value::as_str),
            map.get(TAG_CLASS_KEY).and_then(Value::as_str),
        ) {
            (Some(module), Some(class)) => Self::new(module, class),
            _ => Self::empty(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "(untagged)")
        } else {
            write!(f, "{}.{}", self.module, self.class)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_tag() {
        assert!(TypeTag::empty().is_empty());
        assert!(!TypeTag::new("m", "C").is_empty());
    }

    #[test]
    fn of_value_reads_metadata_keys() {
        let value = json!({"@module": "spectra", "@class": "Spectrum", "points": [1, 2]});
        assert_eq!(TypeTag::of_value(&value), TypeTag::new("spectra", "Spectrum"));
    }

    #[test]
    fn of_value_without_metadata_is_empty() {
        assert!(TypeTag::of_value(&json!({"points": [1, 2]})).is_empty());
        assert!(TypeTag::of_value(&json!([1, 2, 3])).is_empty());
        assert!(TypeTag::of_value(&json!(42)).is_empty());
    }

    #[test]
    fn of_value_requires_both_keys() {
        assert!(TypeTag::of_value(&json!({"@module": "m"})).is_empty());
        assert!(TypeTag::of_value(&json!({"@class": "C"})).is_empty());
        assert!(TypeTag::of_value(&json!({"@module": 1, "@class": "C"})).is_empty());
    }

    #[test]
    fn display_forms() {
        assert_eq!(TypeTag::empty().to_string(), "(untagged)");
        assert_eq!(TypeTag::new("spectra", "Spectrum").to_string(), "spectra.Spectrum");
    }
}

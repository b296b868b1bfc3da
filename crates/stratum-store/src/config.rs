//! Save and load rules for the hybrid store.
//!
//! A [`SaveSpec`] names the fields whose values are offloaded on write; a
//! [`LoadSpec`] decides which reference stubs are resolved on read. Both
//! live in an immutable [`StoreConfig`] captured at store construction and
//! can be overridden per call.

use serde::{Deserialize, Serialize};
use stratum_tree::Location;
use stratum_types::{Tagged, TypeTag};

/// Write-time offload rule: field names whose values move to the blob
/// collection, wherever they occur in a document's tree.
///
/// The default names no fields, meaning documents are upserted as-is with
/// no blob-collection traffic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSpec {
    fields: Vec<String>,
}

impl SaveSpec {
    /// The empty rule: offload nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&str> for SaveSpec {
    fn from(field: &str) -> Self {
        Self {
            fields: vec![field.to_string()],
        }
    }
}

impl From<String> for SaveSpec {
    fn from(field: String) -> Self {
        Self {
            fields: vec![field],
        }
    }
}

impl From<Vec<String>> for SaveSpec {
    fn from(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

impl From<Vec<&str>> for SaveSpec {
    fn from(fields: Vec<&str>) -> Self {
        Self {
            fields: fields.into_iter().map(String::from).collect(),
        }
    }
}

/// One read-time selector: keep a stub by the field name it sits under, or
/// by its recorded type tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    Field(String),
    Type(TypeTag),
}

impl Selector {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Selector for a [`Tagged`] kind's recorded type.
    pub fn kind<T: Tagged>() -> Self {
        Self::Type(T::type_tag())
    }
}

/// Read-time resolution filter.
///
/// `All` resolves every stub, `None` resolves nothing (documents come back
/// with their stubs inline), `Only` resolves the stubs matched by any of
/// its selectors. Stubs the filter drops are left untouched: callers get
/// an unresolved reference, never an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadSpec {
    All,
    #[default]
    None,
    Only(Vec<Selector>),
}

impl LoadSpec {
    /// Should the stub at `location`, carrying `tag`, be resolved?
    ///
    /// A field selector matches the location's final key segment; a stub
    /// under a sequence index has none and only matches by type. A type
    /// selector matches the recorded tag exactly.
    pub fn keeps(&self, tag: &TypeTag, location: &Location) -> bool {
        match self {
            LoadSpec::All => true,
            LoadSpec::None => false,
            LoadSpec::Only(selectors) => selectors.iter().any(|selector| match selector {
                Selector::Field(name) => location.last_key() == Some(name.as_str()),
                Selector::Type(wanted) => wanted == tag,
            }),
        }
    }

    /// Skip stub discovery entirely?
    pub fn is_none(&self) -> bool {
        matches!(self, LoadSpec::None)
    }
}

impl From<bool> for LoadSpec {
    fn from(all: bool) -> Self {
        if all {
            Self::All
        } else {
            Self::None
        }
    }
}

impl From<&str> for LoadSpec {
    fn from(field: &str) -> Self {
        Self::Only(vec![Selector::field(field)])
    }
}

impl From<TypeTag> for LoadSpec {
    fn from(tag: TypeTag) -> Self {
        Self::Only(vec![Selector::Type(tag)])
    }
}

impl From<Vec<Selector>> for LoadSpec {
    fn from(selectors: Vec<Selector>) -> Self {
        Self::Only(selectors)
    }
}

/// Store-level defaults, captured at construction and threaded into each
/// pipeline call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub save: SaveSpec,
    pub load: LoadSpec,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stratum_tree::{get_dotted, set_dotted, value_cmp};

use crate::error::{CollectionError, CollectionResult};

/// Sort direction for one sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

/// One field of a multi-key sort.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub order: Order,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Order::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Order::Desc,
        }
    }
}

/// Result-shaping options for a query.
///
/// `properties: None` returns whole records; `Some(fields)` returns only
/// the named dotted paths. `limit: None` is unbounded. `sort` applies
/// before `skip`/`limit`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub properties: Option<Vec<String>>,
    pub sort: Vec<SortKey>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl QueryOptions {
    pub fn sorted_by(sort: Vec<SortKey>) -> Self {
        Self {
            sort,
            ..Default::default()
        }
    }
}

/// Stable multi-key sort of records in place.
///
/// A record missing a sort field sorts as null (before everything else
/// ascending). Ties keep their original relative order.
pub fn sort_documents(records: &mut [Value], sort: &[SortKey]) {
    if sort.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        for key in sort {
            let av = get_dotted(a, &key.field).unwrap_or(&Value::Null);
            let bv = get_dotted(b, &key.field).unwrap_or(&Value::Null);
            let ordering = match key.order {
                Order::Asc => value_cmp(av, bv),
                Order::Desc => value_cmp(bv, av),
            };
            if ordering != std::cmp::Ordering::Equal {
                return ordering;
            }
        }
        std::cmp::Ordering::Equal
    });
}

/// Shape a record down to the named dotted paths.
///
/// Paths absent from the record are simply omitted.
pub fn project(record: &Value, fields: &[String]) -> CollectionResult<Value> {
    let mut shaped = Value::Object(serde_json::Map::new());
    for field in fields {
        if let Some(value) = get_dotted(record, field) {
            set_dotted(&mut shaped, field, value.clone())
                .map_err(|e| CollectionError::Projection(e.to_string()))?;
        }
    }
    Ok(shaped)
}

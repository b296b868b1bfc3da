use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stratum_tree::get_dotted;

/// One condition on a field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// The field's value equals the given value.
    Eq(Value),
    /// The field's value is one of the given values.
    In(Vec<Value>),
}

impl Clause {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Clause::Eq(expected) => value == expected,
            Clause::In(allowed) => allowed.contains(value),
        }
    }
}

/// A conjunctive filter over dotted field paths.
///
/// An empty criteria matches every record. A record matches when every
/// clause matches; a record missing a filtered field never matches.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum_collection::Criteria;
///
/// let criteria = Criteria::where_eq("state", json!("done")).and_eq("meta.rev", json!(2));
/// assert!(criteria.matches(&json!({"state": "done", "meta": {"rev": 2}})));
/// assert!(!criteria.matches(&json!({"state": "done"})));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    clauses: BTreeMap<String, Clause>,
}

impl Criteria {
    /// The empty criteria, matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Criteria with a single equality clause.
    pub fn where_eq(field: impl Into<String>, value: Value) -> Self {
        Self::all().and_eq(field, value)
    }

    /// Criteria with a single membership clause.
    pub fn where_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::all().and_in(field, values)
    }

    /// Add an equality clause. A later clause on the same field replaces
    /// the earlier one.
    pub fn and_eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.clauses.insert(field.into(), Clause::Eq(value));
        self
    }

    /// Add a membership clause.
    pub fn and_in(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.clauses.insert(field.into(), Clause::In(values));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Does `record` satisfy every clause?
    pub fn matches(&self, record: &Value) -> bool {
        self.clauses.iter().all(|(field, clause)| {
            get_dotted(record, field).is_some_and(|value| clause.matches(value))
        })
    }
}

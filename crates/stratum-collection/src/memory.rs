use std::collections::BTreeSet;
use std::sync::RwLock;

use serde_json::Value;
use stratum_tree::get_dotted;

use crate::criteria::Criteria;
use crate::error::{CollectionError, CollectionResult};
use crate::query::{project, sort_documents, QueryOptions};
use crate::traits::Collection;

/// In-memory, `Vec`-backed collection.
///
/// Intended for tests and embedding. Records are held in memory behind a
/// `RwLock`; every query takes a snapshot of the matching records, so an
/// in-flight iterator never observes later writes. There is nothing to
/// connect to: `connect(force_reset=true)` clears all records, `close` is
/// a no-op.
pub struct InMemoryCollection {
    name: String,
    key: String,
    records: RwLock<Vec<Value>>,
    indexes: RwLock<BTreeSet<String>>,
}

impl InMemoryCollection {
    /// Create a new empty collection with `"id"` as its key field.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_key(name, "id")
    }

    /// Create a new empty collection with the given key field.
    pub fn with_key(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            records: RwLock::new(Vec::new()),
            indexes: RwLock::new(BTreeSet::new()),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.records.write().expect("lock poisoned").clear();
    }

    fn key_tuple<'a>(record: &'a Value, fields: &[&str]) -> CollectionResult<Vec<&'a Value>> {
        fields
            .iter()
            .map(|field| {
                get_dotted(record, field).ok_or_else(|| CollectionError::MissingKeyField {
                    field: field.to_string(),
                })
            })
            .collect()
    }
}

impl Collection for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    fn connect(&self, force_reset: bool) -> CollectionResult<()> {
        if force_reset {
            self.clear();
        }
        Ok(())
    }

    fn close(&self) -> CollectionResult<()> {
        Ok(())
    }

    fn count(&self, criteria: &Criteria) -> CollectionResult<u64> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.iter().filter(|r| criteria.matches(r)).count() as u64)
    }

    fn query<'a>(
        &'a self,
        criteria: &Criteria,
        options: &QueryOptions,
    ) -> CollectionResult<Box<dyn Iterator<Item = Value> + 'a>> {
        let mut matching: Vec<Value> = {
            let records = self.records.read().expect("lock poisoned");
            records
                .iter()
                .filter(|r| criteria.matches(r))
                .cloned()
                .collect()
        };

        sort_documents(&mut matching, &options.sort);

        let limit = options.limit.unwrap_or(usize::MAX);
        let mut shaped = Vec::new();
        for record in matching.into_iter().skip(options.skip).take(limit) {
            match &options.properties {
                Some(fields) => shaped.push(project(&record, fields)?),
                None => shaped.push(record),
            }
        }
        Ok(Box::new(shaped.into_iter()))
    }

    fn update(&self, records: Vec<Value>, key: Option<&[&str]>) -> CollectionResult<()> {
        let own_key = [self.key.as_str()];
        let key_fields: &[&str] = key.unwrap_or(&own_key);

        let mut stored = self.records.write().expect("lock poisoned");
        for record in records {
            let incoming = Self::key_tuple(&record, key_fields)?;
            let existing = stored.iter().position(|candidate| {
                Self::key_tuple(candidate, key_fields)
                    .map(|tuple| tuple == incoming)
                    .unwrap_or(false)
            });
            // Upsert: replace the record with the same key tuple, else append.
            match existing {
                Some(position) => stored[position] = record,
                None => stored.push(record),
            }
        }
        Ok(())
    }

    fn ensure_index(&self, key: &str, unique: bool) -> CollectionResult<bool> {
        let entry = if unique {
            format!("{key} (unique)")
        } else {
            key.to_string()
        };
        self.indexes.write().expect("lock poisoned").insert(entry);
        Ok(true)
    }

    fn remove_docs(&self, criteria: &Criteria) -> CollectionResult<u64> {
        let mut records = self.records.write().expect("lock poisoned");
        let before = records.len();
        records.retain(|r| !criteria.matches(r));
        Ok((before - records.len()) as u64)
    }
}

impl std::fmt::Debug for InMemoryCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCollection")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("record_count", &self.len())
            .finish()
    }
}

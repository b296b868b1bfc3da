use serde_json::Value;

use crate::criteria::Criteria;
use crate::error::CollectionResult;
use crate::query::QueryOptions;

/// Minimal capability contract a backing collection must provide.
///
/// All implementations must satisfy these invariants:
/// - `update` is an idempotent upsert: re-sending an identical batch leaves
///   exactly one record per distinct key tuple and changes nothing else.
/// - `query` is lazy: records are fetched or materialized one at a time,
///   never buffered in bulk, so long scans are memory-bounded.
/// - Each record-level operation is atomic within this collection; nothing
///   here coordinates across collections.
/// - Retry and timeout behavior belongs to the implementation; calls block
///   until the backend answers.
pub trait Collection: Send + Sync {
    /// Identifier for this data source.
    fn name(&self) -> &str;

    /// The primary key field name.
    fn key(&self) -> &str;

    /// Replace the primary key field name.
    ///
    /// Called once at store construction to enforce identity key names;
    /// changing the key on a live collection is undefined.
    fn set_key(&mut self, key: &str);

    /// Connect to the source data, resetting any existing connection when
    /// `force_reset` is true.
    fn connect(&self, force_reset: bool) -> CollectionResult<()>;

    /// Close any connections.
    fn close(&self) -> CollectionResult<()>;

    /// Count the records matching `criteria`.
    fn count(&self, criteria: &Criteria) -> CollectionResult<u64>;

    /// Query for records, lazily.
    fn query<'a>(
        &'a self,
        criteria: &Criteria,
        options: &QueryOptions,
    ) -> CollectionResult<Box<dyn Iterator<Item = Value> + 'a>>;

    /// Query for a single record, or `None` when nothing matches.
    fn query_one(
        &self,
        criteria: &Criteria,
        options: &QueryOptions,
    ) -> CollectionResult<Option<Value>> {
        let mut options = options.clone();
        options.limit = Some(1);
        Ok(self.query(criteria, &options)?.next())
    }

    /// Upsert records by the given key fields (the collection's own key
    /// when `key` is `None`).
    ///
    /// Fails with [`CollectionError::MissingKeyField`] when a record lacks
    /// one of the key fields.
    ///
    /// [`CollectionError::MissingKeyField`]: crate::CollectionError::MissingKeyField
    fn update(&self, records: Vec<Value>, key: Option<&[&str]>) -> CollectionResult<()>;

    /// Try to create an index on `key`; returns `true` when the index
    /// exists or was created.
    fn ensure_index(&self, key: &str, unique: bool) -> CollectionResult<bool>;

    /// Remove the records matching `criteria`, returning how many were
    /// removed.
    fn remove_docs(&self, criteria: &Criteria) -> CollectionResult<u64>;
}

//! The hybrid store facade.
//!
//! [`HybridStore`] wraps two backing collections (documents and blobs)
//! and coordinates the write and read pipelines against them. It holds no
//! locks and provides no cross-collection transaction: each collection's
//! upserts are idempotent and individually atomic, and a failure between
//! the two batches is an eventual-consistency window a retry closes.

use serde_json::{Map, Value};
use stratum_collection::{Collection, Criteria, InMemoryCollection, QueryOptions, SortKey};
use stratum_tree::{get_dotted, set_dotted, value_cmp};
use stratum_types::{DocKey, INDEX_FIELD, UUID_FIELD};
use tracing::debug;

use crate::config::{LoadSpec, SaveSpec, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::read::Resolved;
use crate::stub::{OWNER_INDEX_FIELD, OWNER_UUID_FIELD, STUB_KEY};
use crate::write::offload;

/// Document field read back by [`HybridStore::get_output`].
pub const OUTPUT_FIELD: &str = "output";

/// Which revision's output to fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Select {
    /// The document with the minimum index for the uuid.
    First,
    /// The document with the maximum index for the uuid.
    Last,
    /// Every document for the uuid, ordered by descending index.
    All,
}

/// Builder for [`HybridStore`].
///
/// Both collections are mandatory; [`build`](Self::build) fails fast,
/// before any I/O, when either is missing.
#[derive(Default)]
pub struct HybridStoreBuilder {
    docs: Option<Box<dyn Collection>>,
    blobs: Option<Box<dyn Collection>>,
    config: StoreConfig,
}

impl HybridStoreBuilder {
    /// The collection holding metadata documents.
    pub fn docs(mut self, collection: impl Collection + 'static) -> Self {
        self.docs = Some(Box::new(collection));
        self
    }

    /// The collection holding offloaded blobs.
    pub fn blobs(mut self, collection: impl Collection + 'static) -> Self {
        self.blobs = Some(Box::new(collection));
        self
    }

    /// Default write-time offload rule.
    pub fn save(mut self, save: impl Into<SaveSpec>) -> Self {
        self.config.save = save.into();
        self
    }

    /// Default read-time resolution filter.
    pub fn load(mut self, load: impl Into<LoadSpec>) -> Self {
        self.config.load = load.into();
        self
    }

    pub fn build(self) -> StoreResult<HybridStore> {
        let (Some(mut docs), Some(mut blobs)) = (self.docs, self.blobs) else {
            return Err(StoreError::Config(
                "both a document collection and a blob collection are required".into(),
            ));
        };
        // Enforce the identity key names on both sides.
        docs.set_key(UUID_FIELD);
        blobs.set_key(STUB_KEY);
        Ok(HybridStore {
            docs,
            blobs,
            config: self.config,
        })
    }
}

/// Store pushing and pulling documents across a document collection and a
/// blob collection.
pub struct HybridStore {
    docs: Box<dyn Collection>,
    blobs: Box<dyn Collection>,
    config: StoreConfig,
}

impl HybridStore {
    pub fn builder() -> HybridStoreBuilder {
        HybridStoreBuilder::default()
    }

    /// A store over two fresh in-memory collections, for tests and
    /// embedding.
    pub fn in_memory() -> Self {
        Self {
            docs: Box::new(InMemoryCollection::with_key("documents", UUID_FIELD)),
            blobs: Box::new(InMemoryCollection::with_key("blobs", STUB_KEY)),
            config: StoreConfig::default(),
        }
    }

    /// Identifier for this data source, derived from the document side.
    pub fn name(&self) -> String {
        format!("hybrid-{}", self.docs.name())
    }

    /// The document collection.
    pub fn docs(&self) -> &dyn Collection {
        self.docs.as_ref()
    }

    /// The blob collection.
    pub fn blobs(&self) -> &dyn Collection {
        self.blobs.as_ref()
    }

    /// The store-level save/load defaults.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Connect both collections and make sure the identity indexes exist.
    pub fn connect(&self, force_reset: bool) -> StoreResult<()> {
        self.docs.connect(force_reset)?;
        self.blobs.connect(force_reset)?;
        self.docs.ensure_index(UUID_FIELD, false)?;
        self.docs.ensure_index(INDEX_FIELD, false)?;
        self.blobs.ensure_index(STUB_KEY, true)?;
        Ok(())
    }

    /// Close both collections.
    pub fn close(&self) -> StoreResult<()> {
        self.docs.close()?;
        self.blobs.close()?;
        Ok(())
    }

    /// Count the documents matching `criteria`.
    pub fn count(&self, criteria: &Criteria) -> StoreResult<u64> {
        Ok(self.docs.count(criteria)?)
    }

    /// Query for documents, resolving stubs per `load` (the store default
    /// when `None`).
    ///
    /// Any caller projection is widened with `uuid`/`index` so document
    /// identity survives result shaping.
    pub fn query(
        &self,
        criteria: &Criteria,
        options: &QueryOptions,
        load: Option<&LoadSpec>,
    ) -> StoreResult<Resolved<'_>> {
        let load = load.unwrap_or(&self.config.load).clone();
        let options = with_identity(options);
        let docs = self.docs.query(criteria, &options)?;
        Ok(Resolved::new(docs, self.blobs.as_ref(), load))
    }

    /// Query for a single document, or `None` when nothing matches.
    pub fn query_one(
        &self,
        criteria: &Criteria,
        options: &QueryOptions,
        load: Option<&LoadSpec>,
    ) -> StoreResult<Option<Value>> {
        let mut options = options.clone();
        options.limit = Some(1);
        self.query(criteria, &options, load)?.next().transpose()
    }

    /// Upsert documents, offloading save-field values per `save` (the
    /// store default when `None`).
    ///
    /// Documents land first, staged blobs second; both upserts are
    /// idempotent, so retrying the whole batch after a partial failure
    /// converges instead of duplicating.
    pub fn update<I>(&self, docs: I, save: Option<&SaveSpec>) -> StoreResult<()>
    where
        I: IntoIterator<Item = Value>,
    {
        let save = save.unwrap_or(&self.config.save);

        let mut staged_docs = Vec::new();
        let mut staged_blobs = Vec::new();
        for mut doc in docs {
            let owner = DocKey::of_value(&doc)?;
            staged_blobs.extend(offload(&mut doc, &owner, save)?);
            staged_docs.push(doc);
        }

        self.docs
            .update(staged_docs, Some(&[UUID_FIELD, INDEX_FIELD]))?;
        if !staged_blobs.is_empty() {
            self.blobs.update(staged_blobs, Some(&[STUB_KEY]))?;
        }
        Ok(())
    }

    /// Upsert a single document.
    pub fn update_one(&self, doc: Value, save: Option<&SaveSpec>) -> StoreResult<()> {
        self.update([doc], save)
    }

    /// Try to create an index on the document collection.
    pub fn ensure_index(&self, key: &str, unique: bool) -> StoreResult<bool> {
        Ok(self.docs.ensure_index(key, unique)?)
    }

    /// Group matching documents by the values at the given field paths.
    ///
    /// A document missing any grouping field is excluded entirely. Groups
    /// come back ordered by their key tuple; within a group, documents keep
    /// their original relative order. Each group is `(key document, members)`
    /// where the key document has every grouping path set to its value.
    pub fn groupby(
        &self,
        keys: &[&str],
        criteria: &Criteria,
        options: &QueryOptions,
        load: Option<&LoadSpec>,
    ) -> StoreResult<Vec<(Value, Vec<Value>)>> {
        let mut options = options.clone();
        if let Some(properties) = &mut options.properties {
            for key in keys {
                if !properties.iter().any(|p| p == key) {
                    properties.push((*key).to_string());
                }
            }
        }

        let mut rows: Vec<(Vec<Value>, Value)> = Vec::new();
        for doc in self.query(criteria, &options, load)? {
            let doc = doc?;
            let tuple: Option<Vec<Value>> = keys
                .iter()
                .map(|key| get_dotted(&doc, key).cloned())
                .collect();
            if let Some(tuple) = tuple {
                rows.push((tuple, doc));
            }
        }
        rows.sort_by(|a, b| tuple_cmp(&a.0, &b.0));

        let mut grouped: Vec<(Vec<Value>, Vec<Value>)> = Vec::new();
        for (tuple, doc) in rows {
            match grouped.last_mut() {
                Some((current, members)) if *current == tuple => members.push(doc),
                _ => grouped.push((tuple, vec![doc])),
            }
        }

        let mut result = Vec::new();
        for (tuple, members) in grouped {
            let mut key_doc = Value::Object(Map::new());
            for (key, value) in keys.iter().zip(tuple) {
                set_dotted(&mut key_doc, key, value)?;
            }
            result.push((key_doc, members));
        }
        Ok(result)
    }

    /// Remove the documents matching `criteria` and every blob they own.
    ///
    /// Blobs go first so readers racing the deletion see missing blobs (an
    /// unresolved stub) rather than documents that already vanished; the
    /// window is narrowed, not eliminated.
    pub fn remove_docs(&self, criteria: &Criteria) -> StoreResult<u64> {
        let options = QueryOptions {
            properties: Some(vec![UUID_FIELD.to_string(), INDEX_FIELD.to_string()]),
            ..Default::default()
        };
        let owners: Vec<DocKey> = self
            .docs
            .query(criteria, &options)?
            .map(|doc| DocKey::of_value(&doc).map_err(StoreError::from))
            .collect::<StoreResult<_>>()?;

        for owner in &owners {
            let owned = Criteria::where_eq(OWNER_UUID_FIELD, Value::String(owner.uuid.clone()))
                .and_eq(OWNER_INDEX_FIELD, Value::from(owner.index));
            self.blobs.remove_docs(&owned)?;
        }
        let removed = self.docs.remove_docs(criteria)?;
        debug!(removed, owners = owners.len(), "removed documents and their blobs");
        Ok(removed)
    }

    /// Get the `output` field of the documents stored under `uuid`.
    ///
    /// `Select::Last`/`Select::First` return the output of the highest- or
    /// lowest-index revision; `Select::All` returns every revision's
    /// output, ordered by descending index. Stubs inside the output are
    /// resolved per `load`; nothing is resolved when `None`. Fails with
    /// [`StoreError::NotFound`] when the uuid has no documents.
    pub fn get_output(
        &self,
        uuid: &str,
        which: Select,
        load: Option<&LoadSpec>,
    ) -> StoreResult<Value> {
        let criteria = Criteria::where_eq(UUID_FIELD, Value::String(uuid.to_string()));
        let none = LoadSpec::None;
        let load = Some(load.unwrap_or(&none));

        let sort = match which {
            Select::First => SortKey::asc(INDEX_FIELD),
            Select::Last | Select::All => SortKey::desc(INDEX_FIELD),
        };
        let options = QueryOptions {
            properties: Some(vec![OUTPUT_FIELD.to_string()]),
            sort: vec![sort],
            ..Default::default()
        };

        match which {
            Select::First | Select::Last => {
                let doc = self
                    .query_one(&criteria, &options, load)?
                    .ok_or_else(|| StoreError::NotFound {
                        uuid: uuid.to_string(),
                    })?;
                Ok(doc.get(OUTPUT_FIELD).cloned().unwrap_or(Value::Null))
            }
            Select::All => {
                let outputs: Vec<Value> = self
                    .query(&criteria, &options, load)?
                    .map(|doc| {
                        doc.map(|d| d.get(OUTPUT_FIELD).cloned().unwrap_or(Value::Null))
                    })
                    .collect::<StoreResult<_>>()?;
                if outputs.is_empty() {
                    return Err(StoreError::NotFound {
                        uuid: uuid.to_string(),
                    });
                }
                Ok(Value::Array(outputs))
            }
        }
    }
}

impl std::fmt::Debug for HybridStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridStore")
            .field("docs", &self.docs.name())
            .field("blobs", &self.blobs.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Widen a caller projection with the identity fields.
fn with_identity(options: &QueryOptions) -> QueryOptions {
    let mut options = options.clone();
    if let Some(properties) = &mut options.properties {
        for field in [UUID_FIELD, INDEX_FIELD] {
            if !properties.iter().any(|p| p == field) {
                properties.push(field.to_string());
            }
        }
    }
    options
}

fn tuple_cmp(a: &[Value], b: &[Value]) -> std::cmp::Ordering {
    for (av, bv) in a.iter().zip(b.iter()) {
        match value_cmp(av, bv) {
            std::cmp::Ordering::Equal => continue,
            other => return other,
        }
    }
    std::cmp::Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::is_stub;
    use serde_json::json;
    use stratum_types::TypeTag;

    fn store() -> HybridStore {
        HybridStore::in_memory()
    }

    fn store_with(save: impl Into<SaveSpec>, load: impl Into<LoadSpec>) -> HybridStore {
        HybridStore::builder()
            .docs(InMemoryCollection::new("documents"))
            .blobs(InMemoryCollection::new("blobs"))
            .save(save)
            .load(load)
            .build()
            .unwrap()
    }

    fn doc(uuid: &str, index: u64, output: Value) -> Value {
        json!({"uuid": uuid, "index": index, "output": output})
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn builder_requires_both_collections() {
        let err = HybridStore::builder().build().unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));

        let err = HybridStore::builder()
            .docs(InMemoryCollection::new("documents"))
            .build()
            .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn builder_enforces_identity_keys() {
        let s = store_with("data", false);
        assert_eq!(s.docs().key(), "uuid");
        assert_eq!(s.blobs().key(), "blob_id");
        assert_eq!(s.config().save, SaveSpec::from("data"));
        assert_eq!(s.config().load, LoadSpec::None);
    }

    #[test]
    fn name_derives_from_document_side() {
        assert_eq!(store().name(), "hybrid-documents");
    }

    #[test]
    fn connect_and_close() {
        let s = store();
        s.connect(false).unwrap();
        s.update_one(doc("u", 1, json!(1)), None).unwrap();
        s.connect(true).unwrap();
        assert_eq!(s.count(&Criteria::all()).unwrap(), 0);
        s.close().unwrap();
    }

    // -----------------------------------------------------------------------
    // Write + read round trips
    // -----------------------------------------------------------------------

    #[test]
    fn round_trip_with_load_all() {
        let s = store_with("data", true);
        let original = json!({
            "uuid": "u", "index": 1,
            "output": {"data": [1, 2, 3], "energy": -1.5},
        });
        s.update_one(original.clone(), None).unwrap();

        let read = s
            .query_one(&Criteria::where_eq("uuid", json!("u")), &QueryOptions::default(), None)
            .unwrap()
            .unwrap();
        assert_eq!(read, original);
    }

    #[test]
    fn load_none_returns_unresolved_stub() {
        let s = store_with("data", false);
        s.update_one(
            json!({"uuid": "u", "index": 1, "output": {"data": [1, 2, 3]}}),
            None,
        )
        .unwrap();

        let read = s
            .query_one(&Criteria::where_eq("uuid", json!("u")), &QueryOptions::default(), None)
            .unwrap()
            .unwrap();
        assert!(is_stub(&read["output"]["data"]));

        // The stub's blob exists in the blob collection.
        assert_eq!(s.blobs().count(&Criteria::all()).unwrap(), 1);
    }

    #[test]
    fn per_call_load_overrides_default() {
        let s = store_with("data", false);
        s.update_one(json!({"uuid": "u", "index": 1, "data": [7]}), None)
            .unwrap();

        let read = s
            .query_one(
                &Criteria::all(),
                &QueryOptions::default(),
                Some(&LoadSpec::All),
            )
            .unwrap()
            .unwrap();
        assert_eq!(read["data"], json!([7]));
    }

    #[test]
    fn type_tag_selector_resolves_matching_stubs_only() {
        let s = store_with(vec!["spectrum", "trace"], TypeTag::new("spectra", "Spectrum"));
        s.update_one(
            json!({
                "uuid": "u", "index": 1,
                "spectrum": {"@module": "spectra", "@class": "Spectrum", "points": [1]},
                "trace": [9, 9],
            }),
            None,
        )
        .unwrap();

        let read = s
            .query_one(&Criteria::all(), &QueryOptions::default(), None)
            .unwrap()
            .unwrap();
        assert_eq!(read["spectrum"]["points"], json!([1]));
        assert!(is_stub(&read["trace"]));
    }

    #[test]
    fn empty_save_spec_means_no_blob_traffic() {
        let s = store();
        s.update_one(doc("u", 1, json!({"data": [1, 2]})), None).unwrap();
        assert_eq!(s.blobs().count(&Criteria::all()).unwrap(), 0);

        let read = s
            .query_one(&Criteria::all(), &QueryOptions::default(), Some(&LoadSpec::All))
            .unwrap()
            .unwrap();
        assert_eq!(read["output"]["data"], json!([1, 2]));
    }

    #[test]
    fn update_requires_document_identity() {
        let s = store();
        assert!(s.update_one(json!({"output": 1}), None).is_err());
        assert!(s.update_one(json!({"uuid": "u", "output": 1}), None).is_err());
    }

    #[test]
    fn update_is_idempotent_per_revision() {
        let s = store_with("data", true);
        let batch = vec![
            json!({"uuid": "u", "index": 1, "data": [1]}),
            json!({"uuid": "u", "index": 2, "data": [2]}),
        ];
        s.update(batch.clone(), None).unwrap();
        s.update(batch, None).unwrap();
        // One document per (uuid, index), not one per update call.
        assert_eq!(s.count(&Criteria::all()).unwrap(), 2);
    }

    #[test]
    fn revisions_are_distinct_documents() {
        let s = store();
        s.update(
            vec![doc("u", 1, json!(10)), doc("u", 2, json!(20)), doc("v", 1, json!(30))],
            None,
        )
        .unwrap();
        assert_eq!(s.count(&Criteria::where_eq("uuid", json!("u"))).unwrap(), 2);
        assert_eq!(s.count(&Criteria::all()).unwrap(), 3);
    }

    // -----------------------------------------------------------------------
    // Query shaping
    // -----------------------------------------------------------------------

    #[test]
    fn projection_keeps_identity_fields() {
        let s = store();
        s.update_one(json!({"uuid": "u", "index": 1, "output": 5, "extra": true}), None)
            .unwrap();

        let options = QueryOptions {
            properties: Some(vec!["output".to_string()]),
            ..Default::default()
        };
        let read = s.query_one(&Criteria::all(), &options, None).unwrap().unwrap();
        assert_eq!(read, json!({"uuid": "u", "index": 1, "output": 5}));
    }

    #[test]
    fn query_sorts_and_limits() {
        let s = store();
        s.update(
            vec![doc("a", 1, json!(1)), doc("b", 2, json!(2)), doc("c", 3, json!(3))],
            None,
        )
        .unwrap();

        let options = QueryOptions {
            sort: vec![SortKey::desc("index")],
            limit: Some(2),
            ..Default::default()
        };
        let read: Vec<Value> = s
            .query(&Criteria::all(), &options, None)
            .unwrap()
            .collect::<StoreResult<_>>()
            .unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0]["uuid"], "c");
        assert_eq!(read[1]["uuid"], "b");
    }

    #[test]
    fn query_one_missing_is_none_not_an_error() {
        let s = store();
        let found = s
            .query_one(&Criteria::where_eq("uuid", json!("ghost")), &QueryOptions::default(), None)
            .unwrap();
        assert!(found.is_none());
    }

    // -----------------------------------------------------------------------
    // groupby
    // -----------------------------------------------------------------------

    #[test]
    fn groupby_partitions_by_key() {
        let s = store();
        s.update(
            vec![
                json!({"uuid": "x", "index": 1, "a": 1, "b": 1}),
                json!({"uuid": "y", "index": 1, "a": 1, "b": 2}),
                json!({"uuid": "z", "index": 1, "a": 2, "b": 3}),
            ],
            None,
        )
        .unwrap();

        let groups = s
            .groupby(&["a"], &Criteria::all(), &QueryOptions::default(), None)
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, json!({"a": 1}));
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, json!({"a": 2}));
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn groupby_excludes_documents_missing_a_key() {
        let s = store();
        s.update(
            vec![
                json!({"uuid": "x", "index": 1, "a": 1}),
                json!({"uuid": "y", "index": 1}),
            ],
            None,
        )
        .unwrap();

        let groups = s
            .groupby(&["a"], &Criteria::all(), &QueryOptions::default(), None)
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[0].1[0]["uuid"], "x");
    }

    #[test]
    fn groupby_on_dotted_path_and_multiple_keys() {
        let s = store();
        s.update(
            vec![
                json!({"uuid": "x", "index": 1, "meta": {"kind": "relax"}, "a": 1}),
                json!({"uuid": "y", "index": 1, "meta": {"kind": "relax"}, "a": 1}),
                json!({"uuid": "z", "index": 1, "meta": {"kind": "static"}, "a": 1}),
            ],
            None,
        )
        .unwrap();

        let groups = s
            .groupby(
                &["meta.kind", "a"],
                &Criteria::all(),
                &QueryOptions::default(),
                None,
            )
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, json!({"meta": {"kind": "relax"}, "a": 1}));
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, json!({"meta": {"kind": "static"}, "a": 1}));
    }

    #[test]
    fn groupby_ties_keep_insertion_order() {
        let s = store();
        s.update(
            vec![
                json!({"uuid": "first", "index": 1, "a": 1}),
                json!({"uuid": "second", "index": 1, "a": 1}),
            ],
            None,
        )
        .unwrap();

        let groups = s
            .groupby(&["a"], &Criteria::all(), &QueryOptions::default(), None)
            .unwrap();
        assert_eq!(groups[0].1[0]["uuid"], "first");
        assert_eq!(groups[0].1[1]["uuid"], "second");
    }

    // -----------------------------------------------------------------------
    // remove_docs
    // -----------------------------------------------------------------------

    #[test]
    fn remove_docs_cascades_to_owned_blobs() {
        let s = store_with("data", false);
        s.update(
            vec![
                json!({"uuid": "u", "index": 1, "data": [1]}),
                json!({"uuid": "u", "index": 2, "data": [2]}),
                json!({"uuid": "keep", "index": 1, "data": [3]}),
            ],
            None,
        )
        .unwrap();
        assert_eq!(s.blobs().count(&Criteria::all()).unwrap(), 3);

        let removed = s.remove_docs(&Criteria::where_eq("uuid", json!("u"))).unwrap();
        assert_eq!(removed, 2);

        // Documents for "u" are gone, along with every blob they owned.
        assert_eq!(s.count(&Criteria::where_eq("uuid", json!("u"))).unwrap(), 0);
        assert_eq!(s.blobs().count(&Criteria::all()).unwrap(), 1);
        assert_eq!(s.count(&Criteria::all()).unwrap(), 1);
    }

    // -----------------------------------------------------------------------
    // get_output
    // -----------------------------------------------------------------------

    #[test]
    fn get_output_first_last_all() {
        let s = store();
        s.update(vec![doc("u", 1, json!(10)), doc("u", 2, json!(20))], None)
            .unwrap();

        assert_eq!(s.get_output("u", Select::Last, None).unwrap(), json!(20));
        assert_eq!(s.get_output("u", Select::First, None).unwrap(), json!(10));
        assert_eq!(s.get_output("u", Select::All, None).unwrap(), json!([20, 10]));
    }

    #[test]
    fn get_output_unknown_uuid_is_not_found() {
        let s = store();
        for which in [Select::First, Select::Last, Select::All] {
            let err = s.get_output("ghost", which, None).unwrap_err();
            assert!(matches!(err, StoreError::NotFound { .. }));
        }
    }

    #[test]
    fn get_output_resolves_stubs_on_request() {
        let s = store_with("output", false);
        s.update_one(doc("u", 1, json!({"series": [1, 2, 3]})), None).unwrap();

        // Default: the offloaded output comes back as a stub.
        let raw = s.get_output("u", Select::Last, None).unwrap();
        assert!(is_stub(&raw));

        let resolved = s.get_output("u", Select::Last, Some(&LoadSpec::All)).unwrap();
        assert_eq!(resolved, json!({"series": [1, 2, 3]}));
    }

    #[test]
    fn get_output_missing_field_is_null() {
        let s = store();
        s.update_one(json!({"uuid": "u", "index": 1, "state": "done"}), None)
            .unwrap();
        assert_eq!(s.get_output("u", Select::Last, None).unwrap(), Value::Null);
    }
}

//! The read pipeline: lazy stub resolution.
//!
//! Documents stream out of the document collection one at a time. For each
//! one, the stubs kept by the active [`LoadSpec`] are resolved through a
//! single batched blob fetch and substituted back at their original
//! locations; dropped stubs stay inline. At most one document plus its
//! resolved blobs is in memory at a time.

use std::collections::HashMap;

use serde_json::Value;
use stratum_collection::{Collection, Criteria, QueryOptions};
use stratum_tree::{find_key, get, write, Location};
use stratum_types::BlobId;
use tracing::warn;

use crate::config::LoadSpec;
use crate::error::StoreResult;
use crate::stub::{Stub, DATA_FIELD, STUB_KEY};

/// Lazy stream of documents with their kept stubs resolved.
///
/// Yields one `StoreResult<Value>` per raw document; a blob-collection
/// failure surfaces on the document that triggered it and the stream stays
/// usable for the rest.
pub struct Resolved<'a> {
    docs: Box<dyn Iterator<Item = Value> + 'a>,
    blobs: &'a dyn Collection,
    load: LoadSpec,
}

impl<'a> Resolved<'a> {
    pub(crate) fn new(
        docs: Box<dyn Iterator<Item = Value> + 'a>,
        blobs: &'a dyn Collection,
        load: LoadSpec,
    ) -> Self {
        Self { docs, blobs, load }
    }
}

impl Iterator for Resolved<'_> {
    type Item = StoreResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut doc = self.docs.next()?;
        Some(resolve(&mut doc, &self.load, self.blobs).map(|()| doc))
    }
}

/// Resolve the stubs in one document, in place.
pub(crate) fn resolve(
    doc: &mut Value,
    load: &LoadSpec,
    blobs: &dyn Collection,
) -> StoreResult<()> {
    if load.is_none() {
        return Ok(());
    }

    // Stub positions are found by the sentinel key alone; no knowledge of
    // the save-time field names is needed.
    let mut kept: Vec<(BlobId, Location)> = Vec::new();
    for location in find_key(doc, STUB_KEY, false) {
        let Some(stub) = get(doc, &location).and_then(Stub::of_value) else {
            continue;
        };
        if load.keeps(&stub.tag, &location) {
            kept.push((stub.blob_id, location));
        }
    }
    if kept.is_empty() {
        return Ok(());
    }

    // One batched fetch per document, not one per stub.
    let ids: Vec<Value> = kept
        .iter()
        .map(|(id, _)| Value::String(id.to_string()))
        .collect();
    let options = QueryOptions {
        properties: Some(vec![STUB_KEY.to_string(), DATA_FIELD.to_string()]),
        ..Default::default()
    };
    let mut data_by_id: HashMap<String, Value> = HashMap::new();
    for record in blobs.query(&Criteria::where_in(STUB_KEY, ids), &options)? {
        if let (Some(id), Some(data)) = (
            record.get(STUB_KEY).and_then(Value::as_str),
            record.get(DATA_FIELD),
        ) {
            data_by_id.insert(id.to_string(), data.clone());
        }
    }

    let mut writes = Vec::new();
    for (id, location) in kept {
        match data_by_id.get(&id.to_string()) {
            Some(data) => writes.push((location, data.clone())),
            // Write race or orphaned stub: hand back the unresolved
            // reference rather than failing the whole scan.
            None => warn!(blob_id = %id, location = %location, "stub has no blob; left unresolved"),
        }
    }
    write(doc, writes)?;
    Ok(())
}

//! The write pipeline: blob extraction and staging.
//!
//! For each document, every occurrence of a [`SaveSpec`] field, at any
//! depth, is located, its value moved into a staged blob record, and the
//! position overwritten with a reference stub. The caller upserts the
//! stub-bearing documents and the staged blobs afterwards; nothing here
//! touches a collection.

use serde_json::Value;
use stratum_tree::{find_key, get, write, Location, TreeError};
use stratum_types::DocKey;
use tracing::debug;

use crate::config::SaveSpec;
use crate::error::StoreResult;
use crate::stub::{BlobRecord, Stub};

/// Offload every save-field occurrence in `doc`, in place.
///
/// Returns the staged blob records, each carrying the extracted value and
/// the owning `(uuid, index)` identity. An empty [`SaveSpec`] stages
/// nothing and leaves the document untouched.
pub(crate) fn offload(
    doc: &mut Value,
    owner: &DocKey,
    save: &SaveSpec,
) -> StoreResult<Vec<Value>> {
    if save.is_empty() {
        return Ok(Vec::new());
    }

    // Locate every occurrence across all save fields before mutating, so
    // later finds cannot land inside an already-placed stub.
    let mut locations: Vec<Location> = Vec::new();
    for field in save.fields() {
        locations.extend(find_key(doc, field, true));
    }

    let mut staged = Vec::new();
    let mut stubs = Vec::new();
    for location in locations {
        let value = get(doc, &location)
            .cloned()
            .ok_or_else(|| TreeError::PathNotFound(location.clone()))?;
        let stub = Stub::make(&value);
        staged.push(BlobRecord::new(&stub, value, owner.clone()).to_value());
        stubs.push((location, stub.to_value()));
    }
    // Deepest-first: when one located value contains another, the outer
    // stub must not overwrite the path before the inner write lands.
    stubs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    write(doc, stubs)?;

    if !staged.is_empty() {
        debug!(owner = %owner, blobs = staged.len(), "offloaded values into staged blob records");
    }
    Ok(staged)
}

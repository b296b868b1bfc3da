//! Location algebra for Stratum.
//!
//! Documents are arbitrarily nested JSON trees. This crate provides the
//! generic machinery to address positions inside such trees and to search
//! and mutate them:
//!
//! - [`Location`] — an ordered path of key/index [`Segment`]s
//! - [`find_key`] — deterministic recursive search for every mapping that
//!   carries a given key, at any depth
//! - [`get`] / [`set`] / [`write`] — path lookup and in-place overwrite
//! - [`get_dotted`] / [`set_dotted`] — dotted-path access for query fields
//! - [`value_cmp`] — total natural ordering over JSON values
//!
//! Inputs are plain tree-shaped data (no back-references), so traversal
//! needs no cycle handling. Mappings iterate in key order and sequences in
//! index order, making every search reproducible across runs.

pub mod edit;
pub mod error;
pub mod find;
pub mod location;
pub mod ord;

pub use edit::{get, get_dotted, get_mut, set, set_dotted, write};
pub use error::{TreeError, TreeResult};
pub use find::find_key;
pub use location::{Location, Segment};
pub use ord::value_cmp;

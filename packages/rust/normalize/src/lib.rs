//! Resource normalization for catalog and seed records.
//!
//! The pipeline for a single record is:
//! raw record → [`KeyFilterSet::project`] → [`Normalizer::normalize`]
//! (which may fetch, project and normalize referenced records) →
//! optionally [`combine`] with seed data → optionally [`assign_roles`].

pub mod coerce;
pub mod fetch;
pub mod merge;
pub mod normalizer;
pub mod policy;
pub mod roles;
pub mod schema;
pub mod sentinel;

#[cfg(test)]
mod testing;

pub use coerce::{Coercion, LIST_DELIMITER};
pub use fetch::{Fetch, fetch_record, search_first};
pub use merge::combine;
pub use normalizer::{DEFAULT_MAX_REFERENCE_DEPTH, Normalizer};
pub use policy::{Cardinality, CoercionPolicy, CoercionTable, ReferenceRule};
pub use roles::assign_roles;
pub use schema::{KeyFilterSet, SchemaSet};
pub use sentinel::is_unknown;

//! Pipeline orchestration for the Echo Base dataset.
//!
//! Reads the seed documents, normalizes uninhabited planets, enriches the
//! Echo Base document from the catalog and plans its evacuation.

pub mod documents;
pub mod enrichment;
pub mod evacuation;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

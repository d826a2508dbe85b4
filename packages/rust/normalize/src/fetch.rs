//! The fetch capability the normalizer resolves references through.

use std::future::Future;

use echobase_shared::{EchoBaseError, Record, Result};
use serde_json::Value;

/// Retrieves decoded JSON documents by locator.
///
/// A direct locator returns the record stored there. A collection locator
/// plus query pairs (e.g. `[("search", "hoth")]`) returns a wrapper of the
/// form `{ "results": [record, ...] }`.
pub trait Fetch {
    fn fetch(
        &self,
        locator: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// Fetch a single record at `locator`. Non-object payloads are a decode error.
pub async fn fetch_record<F: Fetch>(fetcher: &F, locator: &str) -> Result<Record> {
    match fetcher.fetch(locator, &[]).await? {
        Value::Object(record) => Ok(record),
        other => Err(EchoBaseError::decode(format!(
            "{locator}: expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

/// Search a collection and return the first result.
///
/// A missing, non-list or empty `results` field is an error.
pub async fn search_first<F: Fetch>(fetcher: &F, collection: &str, term: &str) -> Result<Record> {
    let payload = fetcher.fetch(collection, &[("search", term)]).await?;

    let Value::Object(mut wrapper) = payload else {
        return Err(EchoBaseError::decode(format!(
            "{collection}: expected a search result object"
        )));
    };

    let results = match wrapper.remove("results") {
        Some(Value::Array(results)) => results,
        Some(other) => {
            return Err(EchoBaseError::decode(format!(
                "{collection}: 'results' is {}, expected a list",
                json_type(&other)
            )));
        }
        None => {
            return Err(EchoBaseError::decode(format!(
                "{collection}: search response has no 'results'"
            )));
        }
    };

    match results.into_iter().next() {
        Some(Value::Object(record)) => Ok(record),
        Some(other) => Err(EchoBaseError::decode(format!(
            "{collection}: first search result is {}, expected an object",
            json_type(&other)
        ))),
        None => Err(EchoBaseError::EmptyResults {
            locator: collection.to_string(),
            query: format!("search={term}"),
        }),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

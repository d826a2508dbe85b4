//! In-memory catalog used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use echobase_shared::{EchoBaseError, Result};
use serde_json::Value;

use crate::fetch::Fetch;

/// Serves canned payloads and records every request it receives.
#[derive(Default)]
pub(crate) struct StubCatalog {
    payloads: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl StubCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_record(mut self, locator: &str, payload: Value) -> Self {
        self.payloads.insert(locator.to_string(), payload);
        self
    }

    pub(crate) fn with_search(mut self, collection: &str, term: &str, payload: Value) -> Self {
        self.payloads
            .insert(request_key(collection, &[("search", term)]), payload);
        self
    }

    /// Requests seen so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn request_key(locator: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return locator.to_string();
    }
    let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{locator}?{}", pairs.join("&"))
}

impl Fetch for StubCatalog {
    async fn fetch(&self, locator: &str, query: &[(&str, &str)]) -> Result<Value> {
        let key = request_key(locator, query);
        self.calls.lock().unwrap().push(key.clone());
        self.payloads
            .get(&key)
            .cloned()
            .ok_or_else(|| EchoBaseError::Network(format!("{key}: HTTP 404 Not Found")))
    }
}

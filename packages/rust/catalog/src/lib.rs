//! HTTP client for the remote resource catalog.
//!
//! [`CatalogClient`] implements [`Fetch`], so it can be handed straight to a
//! [`Normalizer`](echobase_normalize::Normalizer) for reference resolution.
//! Requests are issued one at a time by callers; the client never retries.

use std::time::Duration;

use echobase_normalize::{Fetch, fetch_record, search_first};
use echobase_shared::{CatalogConfig, EchoBaseError, EntityKind, Record, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Maximum response size we accept (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// User-Agent string for catalog requests.
const USER_AGENT: &str = concat!("EchoBase/", env!("CARGO_PKG_VERSION"));

/// Catalog client bound to one API root.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Build a client from runtime catalog configuration.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EchoBaseError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Collection locator for `kind`, e.g. `<base>/planets/`.
    pub fn collection_url(&self, kind: EntityKind) -> String {
        format!(
            "{}/{}/",
            self.base_url.as_str().trim_end_matches('/'),
            kind.collection()
        )
    }

    /// Fetch the record at `locator`.
    pub async fn get(&self, locator: &str) -> Result<Record> {
        fetch_record(self, locator).await
    }

    /// Search the collection for `kind` and return the first match.
    #[instrument(skip(self))]
    pub async fn search(&self, kind: EntityKind, term: &str) -> Result<Record> {
        let collection = self.collection_url(kind);
        search_first(self, &collection, term).await
    }
}

impl Fetch for CatalogClient {
    async fn fetch(&self, locator: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = Url::parse(locator)
            .map_err(|e| EchoBaseError::validation(format!("invalid locator '{locator}': {e}")))?;

        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| EchoBaseError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EchoBaseError::Network(format!("{url}: HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(EchoBaseError::validation(format!(
                    "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| EchoBaseError::Network(format!("{url}: failed to read body: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| EchoBaseError::decode(format!("{url}: invalid JSON: {e}")))
    }
}

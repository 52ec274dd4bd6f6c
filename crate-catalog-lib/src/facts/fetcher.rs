//! Fetch-and-cache for JSON web APIs.
//!
//! [`Fetcher::fetch`] consults its [`ResponseStore`] first and only goes to
//! the network on a miss. Successful response bodies are stored verbatim
//! before being parsed; failed and empty responses are reported and never
//! stored, so the next run asks again.

use crate::Result;
use crate::facts::cache::ResponseStore;
use core::sync::atomic::{AtomicUsize, Ordering};
use ohno::IntoAppError;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use url::{Position, Url};

const LOG_TARGET: &str = "   fetcher";

const USER_AGENT: &str = concat!("crate-catalog/", env!("CARGO_PKG_VERSION"));

/// An HTTP GET client with a write-once response cache in front of it.
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    store: Arc<dyn ResponseStore>,
    network_requests: AtomicUsize,
}

impl Fetcher {
    pub fn new(store: Arc<dyn ResponseStore>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            store,
            network_requests: AtomicUsize::new(0),
        })
    }

    /// Number of requests that actually went out to the network.
    #[must_use]
    pub fn network_requests(&self) -> usize {
        self.network_requests.load(Ordering::Relaxed)
    }

    /// Fetch `url` and parse the body as JSON.
    ///
    /// A cached body is returned as-is, however old. On a miss the URL is
    /// requested with `headers`; a non-success status or an empty body (such
    /// as `204 No Content`) yields an empty JSON object and leaves the cache
    /// untouched.
    ///
    /// # Errors
    ///
    /// Transport failures, cache I/O failures and bodies that are not valid
    /// JSON are all reported as errors.
    pub async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<Value> {
        let parsed = Url::parse(url).into_app_err_with(|| format!("parsing URL '{url}'"))?;
        let key = cache_key(&parsed);

        if let Some(body) = self.store.lookup(&key)? {
            return parse_body(&body, url);
        }

        let _ = self.network_requests.fetch_add(1, Ordering::Relaxed);
        log::debug!(target: LOG_TARGET, "GET {url}");

        let response = self
            .client
            .get(parsed)
            .headers(headers.clone())
            .send()
            .await
            .into_app_err_with(|| format!("requesting '{url}'"))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!(
                target: LOG_TARGET,
                "{}: {} for {url}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            );
            return Ok(Value::Object(Map::new()));
        }

        let body = response
            .bytes()
            .await
            .into_app_err_with(|| format!("reading response body from '{url}'"))?;

        if body.trim_ascii().is_empty() {
            log::warn!(target: LOG_TARGET, "{}: empty response body for {url}", status.as_u16());
            return Ok(Value::Object(Map::new()));
        }

        self.store.store(&key, &body)?;
        parse_body(&body, url)
    }
}

/// The cache key for a URL: everything after the scheme, without surrounding slashes.
#[must_use]
pub fn cache_key(url: &Url) -> String {
    url[Position::BeforeHost..Position::AfterQuery].trim_matches('/').to_string()
}

fn parse_body(body: &[u8], url: &str) -> Result<Value> {
    serde_json::from_slice(body).into_app_err_with(|| format!("parsing JSON response from '{url}'"))
}

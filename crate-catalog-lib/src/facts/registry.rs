//! crates.io registry client.
//!
//! Reads the `crate` object of `GET <base>/crates/<name>` and keeps the
//! handful of fields the catalog displays.

use crate::Result;
use crate::facts::CrateEntry;
use crate::facts::fetcher::Fetcher;
use reqwest::header::HeaderMap;
use std::sync::Arc;

/// Default crates.io API base URL.
pub const CRATES_IO_API: &str = "https://crates.io/api/v1";

/// Fields copied from the registry response, in output order.
pub const REGISTRY_FIELDS: [&str; 8] = [
    "description",
    "repository",
    "documentation",
    "downloads",
    "license",
    "max_version",
    "created_at",
    "updated_at",
];

#[derive(Debug, Clone)]
pub struct Registry {
    fetcher: Arc<Fetcher>,
    base_url: String,
}

impl Registry {
    pub fn new(fetcher: Arc<Fetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the catalog fields for the crate `name`.
    ///
    /// An unknown crate or a failed request yields an empty entry; fields the
    /// registry reports as null are left out.
    pub async fn get_package_metadata(&self, name: &str) -> Result<CrateEntry> {
        let url = format!("{}/crates/{name}", self.base_url.trim_end_matches('/'));
        let data = self.fetcher.fetch(&url, &HeaderMap::new()).await?;
        let krate = data.get("crate");

        let mut out = CrateEntry::new();
        for field in REGISTRY_FIELDS {
            out.insert_json(field, krate.and_then(|k| k.get(field)))?;
        }

        Ok(out)
    }
}

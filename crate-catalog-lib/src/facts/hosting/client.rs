//! GitHub API client
//!
//! Minimal GitHub API client for the three repository endpoints the catalog uses.

use crate::Result;
use crate::facts::fetcher::Fetcher;
use ohno::IntoAppError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Default GitHub API base URL.
pub const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Default, Deserialize)]
#[expect(clippy::struct_field_names, reason = "field names match GitHub API exactly")]
pub struct Repository {
    pub stargazers_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub default_branch: Option<String>,
}

/// The commit returned by `/repos/{owner}/{repo}/commits/{ref}`, reduced to what we need
#[derive(Debug, Default, Deserialize)]
pub struct CommitInfo {
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitDetail {
    pub committer: Option<Signature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Signature {
    /// Kept verbatim so the catalog shows exactly what GitHub reported
    pub date: Option<String>,
}

impl CommitInfo {
    #[must_use]
    pub fn committer_date(&self) -> Option<&str> {
        self.commit.as_ref()?.committer.as_ref()?.date.as_deref()
    }
}

/// Hosting API client
#[derive(Debug, Clone)]
pub struct Client {
    fetcher: Arc<Fetcher>,
    base_url: String,
    headers: HeaderMap,
}

impl Client {
    /// Create a new hosting API client with optional authentication token and base URL
    pub fn new(fetcher: Arc<Fetcher>, token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}")).into_app_err("building authorization header")?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        Ok(Self {
            fetcher,
            base_url: base_url.into(),
            headers,
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    fn repo_url(&self, repo: &str) -> String {
        format!("{}/repos/{repo}", self.base_url.trim_end_matches('/'))
    }

    /// Fetch repository info. `None` when GitHub returned nothing usable (e.g. 404).
    pub async fn repository(&self, repo: &str) -> Result<Option<Repository>> {
        let url = self.repo_url(repo);
        let value = self.fetcher.fetch(&url, &self.headers).await?;
        if is_empty_object(&value) {
            return Ok(None);
        }

        let repository = serde_json::from_value(value).into_app_err_with(|| format!("decoding repository info from '{url}'"))?;
        Ok(Some(repository))
    }

    /// Fetch the head commit of `branch`.
    pub async fn commit(&self, repo: &str, branch: &str) -> Result<CommitInfo> {
        let url = format!("{}/commits/{branch}", self.repo_url(repo));
        let value = self.fetcher.fetch(&url, &self.headers).await?;

        serde_json::from_value(value).into_app_err_with(|| format!("decoding commit info from '{url}'"))
    }

    /// Fetch the contributor list and count it.
    ///
    /// A failed call yields an empty object, which counts as zero contributors.
    pub async fn contributor_count(&self, repo: &str) -> Result<Option<usize>> {
        let url = format!("{}/contributors", self.repo_url(repo));
        let value = self.fetcher.fetch(&url, &self.headers).await?;

        Ok(element_count(&value))
    }
}

/// Number of elements in a JSON list or object; `None` for scalars.
fn element_count(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(fields) => Some(fields.len()),
        _ => None,
    }
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(serde_json::Map::is_empty)
}

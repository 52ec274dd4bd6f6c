use super::client::Client;
use crate::Result;
use crate::facts::fetcher::Fetcher;
use crate::facts::{CrateEntry, RepoSpec};
use std::sync::Arc;

const LOG_TARGET: &str = "   hosting";

/// Branch assumed when GitHub does not report a default branch.
pub const FALLBACK_BRANCH: &str = "master";

/// Collects repository statistics from GitHub for catalog entries.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
}

impl Provider {
    /// Create a provider talking to `base_url`, authenticating with `token` when one is given.
    pub fn new(fetcher: Arc<Fetcher>, token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::new(fetcher, token, base_url)?,
        })
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Fetch `stargazers_count`, `open_issues_count`, `last_commit` and `contributor_count`.
    ///
    /// When the repository itself cannot be fetched the commit and contributor
    /// endpoints are not queried and the result is empty.
    pub async fn get_repo_metadata(&self, repo_spec: &RepoSpec) -> Result<CrateEntry> {
        let repo = repo_spec.to_string();
        let mut out = CrateEntry::new();

        let Some(repository) = self.client.repository(&repo).await? else {
            log::debug!(target: LOG_TARGET, "No repository info for '{repo}', skipping commit and contributor lookups");
            return Ok(out);
        };

        let branch = repository.default_branch.as_deref().unwrap_or(FALLBACK_BRANCH);
        let commit = self.client.commit(&repo, branch).await?;
        let contributor_count = self.client.contributor_count(&repo).await?;

        out.insert_opt("stargazers_count", repository.stargazers_count);
        out.insert_opt("open_issues_count", repository.open_issues_count);
        out.insert_opt("last_commit", commit.committer_date());
        out.insert_opt("contributor_count", contributor_count);

        Ok(out)
    }
}

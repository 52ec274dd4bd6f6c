use core::fmt::{Display, Formatter};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static GITHUB_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^./]+)/([^./]+)").expect("GitHub repository pattern is valid"));

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Find a `github.com/<owner>/<repo>` reference in a repository URL.
    ///
    /// Owner and repo stop at the first `.` or `/`, so a trailing `.git` or
    /// any deeper path is ignored. Returns `None` for URLs on other hosts.
    #[must_use]
    pub fn from_github_url(url: &str) -> Option<Self> {
        let captures = GITHUB_REPO.captures(url)?;
        Some(Self {
            owner: Arc::from(captures.get(1)?.as_str()),
            repo: Arc::from(captures.get(2)?.as_str()),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

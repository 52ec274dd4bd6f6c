mod client;
mod provider;

pub use client::{Client, CommitInfo, GITHUB_API, Repository};
pub use provider::{FALLBACK_BRANCH, Provider};

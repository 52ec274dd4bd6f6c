//! Turns curated entries into fully populated catalog entries.
//!
//! Entries are processed one at a time, in input order. For each one the
//! registry is asked first (when the entry has a `name`) and GitHub second
//! (when a GitHub repository URL is known by then). Every fetched mapping is
//! merged *under* the entry, so curated fields always win, and registry
//! fields win over GitHub ones.

use crate::Result;
use crate::facts::crate_entry::merge_with_override;
use crate::facts::hosting::Provider;
use crate::facts::registry::Registry;
use crate::facts::{CrateEntry, RepoSpec};
use core::fmt::{Display, Formatter};
use ohno::bail;

const LOG_TARGET: &str = "aggregator";

/// A data-quality problem found while aggregating an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The entry has no crates.io name, so no registry data was fetched.
    MissingName { repository: String },

    /// No GitHub repository could be derived for the entry.
    MissingGithub { label: String },

    /// The entry ended up without a `documentation` field.
    MissingDocs { label: String },
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingName { repository } => write!(f, "No crates.io name specified for {repository}"),
            Self::MissingGithub { label } => write!(f, "No GitHub repository specified for crate {label}"),
            Self::MissingDocs { label } => write!(f, "Docs missing for crate {label}"),
        }
    }
}

/// The result of a run: one entry per input entry, plus the warnings raised.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub entries: Vec<CrateEntry>,
    pub warnings: Vec<Warning>,
}

/// Check that an entry identifies a crate by `name` and/or `repository`.
pub fn validate_entry(entry: &CrateEntry) -> Result<()> {
    if entry.name().is_none() && entry.repository().is_none() {
        bail!("crate entry is invalid: {entry}");
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    registry: Registry,
    hosting: Provider,
}

impl Aggregator {
    #[must_use]
    pub const fn new(registry: Registry, hosting: Provider) -> Self {
        Self { registry, hosting }
    }

    /// Aggregate every entry, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that has neither `name` nor `repository`, and
    /// on any fetch error that is not a plain HTTP failure status.
    pub async fn aggregate(&self, entries: impl IntoIterator<Item = CrateEntry>) -> Result<Aggregation> {
        let mut aggregation = Aggregation::default();

        for entry in entries {
            let entry = self.aggregate_one(entry, &mut aggregation.warnings).await?;
            aggregation.entries.push(entry);
        }

        Ok(aggregation)
    }

    async fn aggregate_one(&self, mut entry: CrateEntry, warnings: &mut Vec<Warning>) -> Result<CrateEntry> {
        validate_entry(&entry)?;

        log::info!(target: LOG_TARGET, "Processing {}", entry.label());

        if let Some(name) = entry.name() {
            let registry_data = self.registry.get_package_metadata(name).await?;
            entry = merge_with_override(registry_data, entry);
        } else {
            warn(
                warnings,
                Warning::MissingName {
                    repository: entry.label().to_string(),
                },
            );
        }

        if let Some(repo_spec) = entry.repository().and_then(RepoSpec::from_github_url) {
            let hosting_data = self.hosting.get_repo_metadata(&repo_spec).await?;
            entry = merge_with_override(hosting_data, entry);
            entry.insert("github", repo_spec.to_string());
        } else {
            warn(
                warnings,
                Warning::MissingGithub {
                    label: entry.label().to_string(),
                },
            );
        }

        if !entry.contains_key("documentation") {
            warn(
                warnings,
                Warning::MissingDocs {
                    label: entry.label().to_string(),
                },
            );
        }

        Ok(entry)
    }
}

fn warn(warnings: &mut Vec<Warning>, warning: Warning) {
    log::warn!(target: LOG_TARGET, "{warning}");
    warnings.push(warning);
}

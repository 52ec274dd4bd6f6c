use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::facts::hosting::Provider;
use crate::facts::{Aggregator, DiskStore, Fetcher, Registry, load_entries, save_entries};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "  generate";

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Generated crate list to write (overrides the configuration file)
    #[arg(long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Root directory of the response cache (default is the system temporary directory)
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// GitHub OAuth token used for API requests
    #[arg(long, value_name = "TOKEN", env = "GITHUB_OAUTH_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

/// Build the catalog: load the curated list, aggregate it, and write the result.
///
/// Nothing is written when any entry fails validation.
pub async fn generate_catalog<H: Host>(host: &mut H, args: &GenerateArgs) -> Result<()> {
    let mut config = args.common.setup()?;
    config.apply_overrides(None, args.output.as_ref(), args.cache_dir.as_ref())?;

    let store = Arc::new(DiskStore::new(config.cache_root()));
    let fetcher = Arc::new(Fetcher::new(store)?);
    let registry = Registry::new(Arc::clone(&fetcher), config.registry_url.as_str());
    let hosting = Provider::new(Arc::clone(&fetcher), args.github_token.as_deref(), config.hosting_url.as_str())?;

    if args.github_token.is_none() {
        log::debug!(target: LOG_TARGET, "No GitHub token configured, using anonymous API access");
    }

    let entries = load_entries(&config.input)?;
    let aggregation = Aggregator::new(registry, hosting).aggregate(entries).await?;
    save_entries(&config.output, &aggregation.entries)?;

    log::debug!(target: LOG_TARGET, "Issued {} network request(s)", fetcher.network_requests());

    let _ = writeln!(
        host.output(),
        "Wrote {} crate(s) to {} with {} warning(s)",
        aggregation.entries.len(),
        config.output,
        aggregation.warnings.len()
    );

    Ok(())
}

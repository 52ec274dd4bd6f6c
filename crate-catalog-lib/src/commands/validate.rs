use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::facts::{load_entries, validate_entry};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Load the configuration and the curated list and check every entry, without any network access
fn validate_catalog_inner(args: &ValidateArgs) -> Result<(usize, String)> {
    let config = args.common.setup()?;
    let entries = load_entries(&config.input)?;

    for entry in &entries {
        validate_entry(entry)?;
    }

    Ok((entries.len(), config.input.to_string()))
}

pub fn validate_catalog<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    match validate_catalog_inner(args) {
        Ok((count, input)) => {
            let _ = writeln!(host.output(), "Crate list is valid");
            let _ = writeln!(host.output(), "{count} entries in {input}");
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Crate list validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

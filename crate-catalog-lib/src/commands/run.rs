//! Command dispatch logic for crate-catalog

use super::{GenerateArgs, InitArgs, ValidateArgs, generate_catalog, init_config, validate_catalog};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "crate-catalog", version, author, long_about = None)]
#[command(about = "Generate a crate catalog from crates.io and GitHub metadata")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Subcommand, Debug)]
enum CatalogSubcommand {
    /// Fetch metadata for every curated crate and write the generated list
    Generate(Box<GenerateArgs>),
    /// Check the curated crate list without fetching anything
    Validate(ValidateArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        CatalogSubcommand::Generate(generate_args) => generate_catalog(host, generate_args).await,
        CatalogSubcommand::Validate(validate_args) => validate_catalog(host, validate_args),
        CatalogSubcommand::Init(init_args) => init_config(host, init_args),
    }
}

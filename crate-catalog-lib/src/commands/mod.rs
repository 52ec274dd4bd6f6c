//! Command-line interface and orchestration for crate-catalog
//!
//! # Commands
//!
//! - **generate**: load the curated crate list, enrich every entry with
//!   crates.io and GitHub metadata, and write the generated list
//! - **validate**: check that every curated entry names a crate or a
//!   repository, without touching the network
//! - **init**: write a default `catalog.toml`
//!
//! The `run` function parses command-line arguments using clap and routes to
//! the appropriate handler. Settings come from `catalog.toml` (or the file
//! given with `--config`), with command-line flags taking precedence.

mod common;
mod config;
mod generate;
mod host;
mod init;
mod run;
mod validate;

pub use common::{CommonArgs, LogLevel};
pub use config::Config;
pub use generate::{GenerateArgs, generate_catalog};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_catalog};

//! Data collection and aggregation for the crate catalog
//!
//! This module gathers metadata about the crates listed in a curated catalog
//! from crates.io and GitHub and merges it into the curated entries.
//!
//! # Implementation Model
//!
//! - [`Fetcher`] performs HTTP GETs for JSON APIs behind a [`ResponseStore`].
//!   Successful bodies are stored once and served from the store forever after.
//! - [`Registry`] extracts package fields from the crates.io API.
//! - [`hosting::Provider`] extracts repository statistics from the GitHub API.
//! - [`Aggregator`] walks the curated entries in order, merging fetched data
//!   *under* each entry with [`merge_with_override`] so curated fields win.
//!
//! Missing upstream data never stops a run; it only yields [`Warning`]s and
//! absent fields.

mod aggregator;
mod cache;
mod catalog;
mod crate_entry;
mod fetcher;
pub mod hosting;
mod path_utils;
mod registry;
mod repo_spec;

pub use aggregator::{Aggregation, Aggregator, Warning, validate_entry};
pub use cache::{BODY_FILE_NAME, DiskStore, MemoryStore, ResponseStore};
pub use catalog::{load_entries, save_entries};
pub use crate_entry::{CrateEntry, merge_with_override};
pub use fetcher::{Fetcher, cache_key};
pub use registry::{CRATES_IO_API, REGISTRY_FIELDS, Registry};
pub use repo_spec::RepoSpec;

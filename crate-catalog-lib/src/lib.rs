#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for crate-catalog
//!
//! This library holds all functionality of the crate-catalog tool, which turns
//! a curated list of Rust crates into a catalog enriched with crates.io and
//! GitHub metadata.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Fetching, caching, and merging crate metadata

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod facts;

pub use crate::commands::{Host, run};

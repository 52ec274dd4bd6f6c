//! Mapping cache keys onto safe relative filesystem paths.

use std::path::PathBuf;

/// Sanitize a string for use as a path component
///
/// Replaces `..` and characters that are invalid or meaningful on common
/// filesystems (`\ : * ? " < > |` and `/`) with `_`.
///
/// # Examples
///
/// ```ignore
/// // This is an internal utility function
/// assert_eq!(sanitize_path_component("crates.io"), "crates.io");
/// assert_eq!(sanitize_path_component("127.0.0.1:8080"), "127.0.0.1_8080");
/// ```
#[must_use]
pub fn sanitize_path_component(s: &str) -> String {
    let s = s.replace("..", "__");
    s.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}

/// Turn a `/`-separated cache key into a relative directory path.
///
/// Empty segments are dropped and every remaining segment is sanitized, so
/// the result always stays below the directory it is joined onto.
#[must_use]
pub fn key_to_relative_path(key: &str) -> PathBuf {
    key.split('/')
        .filter(|segment| !segment.is_empty())
        .map(sanitize_path_component)
        .collect()
}

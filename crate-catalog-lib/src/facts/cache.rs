//! Response stores backing the fetch-and-cache layer.
//!
//! A [`ResponseStore`] maps a cache key (a URL without its scheme) to the raw
//! response body that was fetched for it. Entries have no timestamp and never
//! expire: the presence of an entry is the only cache-hit signal.
//!
//! [`DiskStore`] keeps one directory per key holding an `index.json` file.
//! [`MemoryStore`] keeps everything in memory and is meant for tests.

use crate::Result;
use crate::facts::path_utils::key_to_relative_path;
use core::fmt::Debug;
use ohno::IntoAppError;
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const LOG_TARGET: &str = "     cache";

/// File name holding the body of every cached response.
pub const BODY_FILE_NAME: &str = "index.json";

/// Keyed storage for raw response bodies.
pub trait ResponseStore: Debug + Send + Sync {
    /// Return the body stored under `key`, or `None` on a miss.
    fn lookup(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `body` under `key`.
    fn store(&self, key: &str, body: &[u8]) -> Result<()>;
}

/// A directory-backed response store.
#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { dir: cache_dir.into() }
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds the body for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key_to_relative_path(key)).join(BODY_FILE_NAME)
    }
}

impl ResponseStore for DiskStore {
    fn lookup(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);

        match fs::read(&path) {
            Ok(body) => {
                log::debug!(target: LOG_TARGET, "Cache hit for {key}");
                Ok(Some(body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(target: LOG_TARGET, "Cache miss for {key}");
                Ok(None)
            }
            Err(e) => Err(e).into_app_err_with(|| format!("reading cache file '{}'", path.display())),
        }
    }

    fn store(&self, key: &str, body: &[u8]) -> Result<()> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{}'", parent.display()))?;
        }

        let file = File::create(&path).into_app_err_with(|| format!("creating cache file '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);

        writer
            .write_all(body)
            .into_app_err_with(|| format!("writing cache file '{}'", path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing cache file '{}'", path.display()))?;

        log::debug!(target: LOG_TARGET, "Cached {} bytes for {key}", body.len());
        Ok(())
    }
}

/// An in-memory response store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `(key, body)` pairs.
    #[must_use]
    pub fn with_entries<K, B>(entries: impl IntoIterator<Item = (K, B)>) -> Self
    where
        K: Into<String>,
        B: Into<Vec<u8>>,
    {
        let entries = entries.into_iter().map(|(k, b)| (k.into(), b.into())).collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).contains_key(key)
    }
}

impl ResponseStore for MemoryStore {
    fn lookup(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    fn store(&self, key: &str, body: &[u8]) -> Result<()> {
        let _ = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), body.to_vec());
        Ok(())
    }
}

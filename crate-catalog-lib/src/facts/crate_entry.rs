//! The mapping that represents one crate as it flows through the pipeline.

use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// One crate of the catalog: an ordered mapping of string keys to YAML values.
///
/// Entries start life as curated records from the source list and accumulate
/// registry and hosting fields as they pass through the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrateEntry(Mapping);

impl CrateEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The crates.io package name, if the entry has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// The repository URL, if the entry has one.
    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        self.get_str("repository")
    }

    /// A human-readable label for diagnostics: the name, else the repository.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name().or_else(|| self.repository()).unwrap_or_default()
    }

    /// Set a field, replacing any previous value but keeping its position.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        let _ = self.0.insert(Value::from(key), value.into());
    }

    /// Set a field from an upstream JSON value; absent and null values are skipped.
    pub fn insert_json(&mut self, key: &str, value: Option<&serde_json::Value>) -> Result<()> {
        match value {
            None | Some(serde_json::Value::Null) => Ok(()),
            Some(value) => {
                let value = serde_yaml::to_value(value).into_app_err_with(|| format!("converting field '{key}'"))?;
                self.insert(key, value);
                Ok(())
            }
        }
    }

    /// Set a field when a value is present.
    pub fn insert_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().filter_map(Value::as_str)
    }
}

impl From<Mapping> for CrateEntry {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

impl Display for CrateEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_scalar(f, key)?;
            write!(f, ": ")?;
            write_scalar(f, value)?;
        }
        write!(f, "}}")
    }
}

fn write_scalar(f: &mut Formatter<'_>, value: &Value) -> core::fmt::Result {
    match value {
        Value::Null => write!(f, "null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::String(s) => write!(f, "{s:?}"),
        Value::Sequence(seq) => write!(f, "[{} item(s)]", seq.len()),
        Value::Mapping(map) => write!(f, "{{{} key(s)}}", map.len()),
        Value::Tagged(tagged) => write_scalar(f, &tagged.value),
    }
}

/// Merge `overrides` on top of `base`, returning the combined entry.
///
/// Every field of `overrides` wins over the same field in `base`. Keys keep
/// the order of `base`; keys that only exist in `overrides` follow in their
/// own order.
#[must_use]
pub fn merge_with_override(base: CrateEntry, overrides: CrateEntry) -> CrateEntry {
    let mut merged = base.0;
    for (key, value) in overrides.0 {
        let _ = merged.insert(key, value);
    }

    CrateEntry(merged)
}

use crate::Result;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given explicitly
pub const CONFIG_FILE_NAME: &str = "catalog.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Curated crate list to read
    pub input: Utf8PathBuf,

    /// Generated crate list to write
    pub output: Utf8PathBuf,

    /// crates.io API base URL
    pub registry_url: String,

    /// GitHub API base URL
    pub hosting_url: String,

    /// Root directory of the response cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<Utf8PathBuf>,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading crate-catalog configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading crate-catalog configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Replace configured values with the ones given on the command line, then re-validate.
    pub fn apply_overrides(
        &mut self,
        input: Option<&Utf8PathBuf>,
        output: Option<&Utf8PathBuf>,
        cache_dir: Option<&Utf8PathBuf>,
    ) -> Result<()> {
        if let Some(input) = input {
            self.input.clone_from(input);
        }

        if let Some(output) = output {
            self.output.clone_from(output);
        }

        if let Some(cache_dir) = cache_dir {
            self.cache_dir = Some(cache_dir.clone());
        }

        self.validate()
    }

    /// The cache root, falling back to the system temporary directory
    #[must_use]
    pub fn cache_root(&self) -> PathBuf {
        self.cache_dir
            .as_ref()
            .map_or_else(std::env::temp_dir, |dir| dir.as_std_path().to_path_buf())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the input and output paths coincide or a base URL is malformed
    fn validate(&self) -> Result<()> {
        if without_cur_dirs(&self.input) == without_cur_dirs(&self.output) {
            return Err(app_err!("output path must differ from input path, both are '{}'", self.input));
        }

        for (name, url) in [("registry_url", &self.registry_url), ("hosting_url", &self.hosting_url)] {
            let _ = Url::parse(url).into_app_err_with(|| format!("{name} is not a valid URL: '{url}'"))?;
        }

        Ok(())
    }
}

/// The path with every `.` component removed, so `./a/b` and `a/./b` compare equal to `a/b`.
fn without_cur_dirs(path: &Utf8Path) -> Utf8PathBuf {
    path.components()
        .filter(|component| !matches!(component, Utf8Component::CurDir))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

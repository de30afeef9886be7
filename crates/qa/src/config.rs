//! Configuration loading for the `qa` CLI.
//!
//! The optional `--config` file is parsed into the engine [`Options`]. JSON
//! and YAML are accepted; the format is chosen from the file extension, and
//! anything unrecognised is read as YAML, which also accepts JSON documents.
//! Without a file the options are the empty mapping.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use qa_lib::{NotAMapping, Options};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while resolving the configuration file.
///
/// All of them are fatal: the CLI aborts before the engine starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is missing or unreadable.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON.
    #[error("failed to parse config file {} as JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The file is not valid YAML.
    #[error("failed to parse config file {} as YAML: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// The document parsed but is not a mapping.
    #[error("invalid config file {}: {source}", path.display())]
    NotMapping {
        path: PathBuf,
        #[source]
        source: NotAMapping,
    },
}

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Resolve the optional configuration file into engine options.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, cannot be parsed, or
/// does not contain a mapping.
///
/// # Examples
///
/// ```rust
/// use qa::config::resolve;
///
/// let options = resolve(None).expect("no config is valid");
/// assert!(options.is_empty());
/// ```
pub fn resolve(path: Option<&Path>) -> Result<Options, ConfigError> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse(path, &text)?;
    tracing::debug!(config = %path.display(), keys = options.len(), "Configuration loaded");
    Ok(options)
}

fn parse(path: &Path, text: &str) -> Result<Options, ConfigError> {
    if text.trim().is_empty() {
        return Ok(Options::default());
    }
    let value: Value = match ConfigFormat::detect(path) {
        ConfigFormat::Json => serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        ConfigFormat::Yaml => serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };
    Options::try_from(value).map_err(|source| ConfigError::NotMapping {
        path: path.to_path_buf(),
        source,
    })
}

//! Configuration-file resolution and loading.
//!
//! A configuration file is optional: when no `--config` path is given and
//! the project root has no `typemend.json`, built-in defaults apply. An
//! explicitly requested file that cannot be read or parsed is a
//! configuration error, never silently ignored.

use std::fs;
use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::options::{CliOverrides, Options, RawOptions, fill_out_raw_options};

/// File name looked up under the project root when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "typemend.json";

/// Errors encountered while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file '{path}' does not exist")]
    Missing {
        /// The requested path.
        path: Utf8PathBuf,
    },

    /// A configuration file exists but could not be read.
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        /// The file that failed to read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A configuration file is not valid JSON for the options schema.
    #[error("failed to parse configuration file '{path}': {source}")]
    Parse {
        /// The file that failed to parse.
        path: Utf8PathBuf,
        /// Underlying deserialisation error.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

/// Loads filled-out options for a run.
///
/// `config_path` selects an explicit configuration file; relative paths
/// resolve against `root`. Without it, `root`'s [`DEFAULT_CONFIG_FILE`] is
/// used when present and built-in defaults otherwise. Command-line
/// overrides win over file values either way.
///
/// # Errors
///
/// Returns [`ConfigError`] when an explicitly requested file is missing, or
/// when any configuration file cannot be read or parsed.
pub fn load_options(
    root: &Utf8Path,
    config_path: Option<&Utf8Path>,
    overrides: &CliOverrides,
) -> Result<Options, ConfigError> {
    let raw = match config_path {
        Some(path) => read_raw_options(&resolve(root, path), true)?,
        None => read_raw_options(&root.join(DEFAULT_CONFIG_FILE), false)?,
    };
    Ok(fill_out_raw_options(
        root.to_owned(),
        raw.unwrap_or_default(),
        overrides,
    ))
}

fn resolve(root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_owned()
    } else {
        root.join(path)
    }
}

fn read_raw_options(path: &Utf8Path, required: bool) -> Result<Option<RawOptions>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            if required {
                return Err(ConfigError::Missing {
                    path: path.to_owned(),
                });
            }
            return Ok(None);
        }
        Err(error) => {
            return Err(ConfigError::Read {
                path: path.to_owned(),
                source: Arc::new(error),
            });
        }
    };
    let raw = serde_json::from_str(&text).map_err(|error| ConfigError::Parse {
        path: path.to_owned(),
        source: Arc::new(error),
    })?;
    Ok(Some(raw))
}

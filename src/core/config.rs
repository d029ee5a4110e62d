//! # Override Configuration
//!
//! Loads and saves the [`Configuration`] snapshot. The persisted form is a
//! small TOML file:
//!
//! ```toml
//! marker_file_names = ["requirements.txt"]
//!
//! [overrides]
//! "~/work/monorepo" = "3.12.1/mono"
//! ```
//!
//! Override keys are written in `~/...` shorthand and expanded (then
//! canonicalized) on load. Each value encodes `<version>/<envname>`; either
//! half may be empty.

use crate::constants::DEFAULT_MARKER_FILENAME;
use crate::core::paths::{self, PathError};
use crate::core::probe::FilesystemProbe;
use crate::models::{Configuration, PathOverride};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration file '{path}' is malformed: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Override for '{key}' has malformed value '{value}' (expected '<version>/<envname>').")]
    MalformedOverride { key: String, value: String },
    #[error("Failed to serialize configuration to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Could not write configuration file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not replace configuration file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error(transparent)]
    Path(#[from] PathError),
}

type ConfigResult<T> = Result<T, ConfigError>;

/// The on-disk shape of the configuration. `BTreeMap` keeps key order stable.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PersistedConfig {
    #[serde(default = "default_markers")]
    marker_file_names: Vec<String>,
    #[serde(default)]
    overrides: BTreeMap<String, String>,
}

fn default_markers() -> Vec<String> {
    vec![DEFAULT_MARKER_FILENAME.to_string()]
}

/// Encodes an override as `<version>/<envname>`.
pub fn encode_override(entry: &PathOverride) -> String {
    format!(
        "{}/{}",
        entry.interpreter_version.as_deref().unwrap_or_default(),
        entry.environment_name.as_deref().unwrap_or_default()
    )
}

/// Decodes `<version>/<envname>`. Empty halves become `None`.
pub fn decode_override(key: &str, value: &str) -> ConfigResult<PathOverride> {
    let (version, name) = value
        .split_once('/')
        .ok_or_else(|| ConfigError::MalformedOverride {
            key: key.to_string(),
            value: value.to_string(),
        })?;
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    Ok(PathOverride {
        interpreter_version: non_empty(version),
        environment_name: non_empty(name),
    })
}

/// Parses the persisted form. Keys are expanded against `home` and canonicalized.
pub fn parse(
    content: &str,
    origin: &Path,
    home: &Path,
    probe: &dyn FilesystemProbe,
) -> ConfigResult<Configuration> {
    let persisted: PersistedConfig =
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.display().to_string(),
            source,
        })?;

    let mut overrides = BTreeMap::new();
    for (key, value) in &persisted.overrides {
        let entry = decode_override(key, value)?;
        let canonical = paths::canonicalize(probe, Path::new(key), home, home)?;
        overrides.insert(canonical, entry);
    }

    Ok(Configuration {
        marker_file_names: persisted.marker_file_names,
        overrides,
    })
}

/// Renders the persisted form. Deterministic: the same logical configuration
/// always produces byte-identical output.
pub fn render(config: &Configuration, home: &Path) -> ConfigResult<String> {
    let persisted = PersistedConfig {
        marker_file_names: config.marker_file_names.clone(),
        overrides: config
            .overrides
            .iter()
            .filter(|(_, entry)| !entry.is_empty())
            .map(|(key, entry)| (paths::unresolve(key, home), encode_override(entry)))
            .collect(),
    };
    Ok(toml::to_string_pretty(&persisted)?)
}

/// Loads the configuration at `path`, or the default one if the file is absent.
///
/// A file that exists but cannot be parsed is an error; it never silently
/// falls back to the defaults.
pub fn load(path: &Path, home: &Path, probe: &dyn FilesystemProbe) -> ConfigResult<Configuration> {
    match fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loading configuration from '{}'.", path.display());
            parse(&content, path, home, probe)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!(
                "No configuration at '{}'. Using defaults.",
                path.display()
            );
            Ok(Configuration::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Saves the configuration atomically: the new content is written to a
/// temporary file in the same directory, then renamed over `path`.
pub fn save(path: &Path, config: &Configuration, home: &Path) -> ConfigResult<()> {
    let content = render(config, home)?;
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let write_err = |source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(&dir).map_err(write_err)?;
    let mut temp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    temp.write_all(content.as_bytes()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path)?;

    log::debug!("Configuration saved to '{}'.", path.display());
    Ok(())
}

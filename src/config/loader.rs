use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::args::{Registry, RegistryError};
use crate::config::types::FlagsFile;

/// Errors that can occur when loading a flag registry file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read flags file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse flags file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid flag in '{path}': {source}")]
    InvalidFlag {
        path: PathBuf,
        #[source]
        source: RegistryError,
    },
}

impl FlagsFile {
    /// Returns the path to the default flags file.
    ///
    /// Uses `~/.config/healthy-options/flags.toml` on Unix/macOS, or the
    /// equivalent via `dirs::config_dir()`. Falls back to the current directory.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("healthy-options").join("flags.toml")
    }

    /// Loads the default flags file.
    ///
    /// A missing file yields an empty flag set.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();

        if !path.exists() {
            tracing::warn!(path = %path.display(), "No flags file found, starting with an empty registry");
            return Ok(FlagsFile::default());
        }

        Self::load_from(&path)
    }

    /// Loads and parses a flags file. Unknown keys are rejected.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Load a validated registry from `path`, or from the default location.
pub fn load_registry(path: Option<&Path>) -> Result<Registry, ConfigError> {
    let (file, source_path) = match path {
        Some(path) => (FlagsFile::load_from(path)?, path.to_path_buf()),
        None => (FlagsFile::load()?, FlagsFile::default_path()),
    };

    let registry = file
        .into_registry()
        .map_err(|e| ConfigError::InvalidFlag {
            path: source_path.clone(),
            source: e,
        })?;

    tracing::debug!(path = %source_path.display(), flags = registry.len(), "Loaded flag registry");
    Ok(registry)
}

//! Configuration loading.
//!
//! Reads the root configuration from `config.toml` (by default
//! `~/.config/voicenav/config.toml`).

use std::path::{Path, PathBuf};

use voicenav_core::config::NavConfig;
use voicenav_core::error::{NavError, Result};

use crate::paths::VoicenavPaths;

/// Loads [`NavConfig`] from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses an explicit configuration file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the platform default location.
    pub fn new() -> Result<Self> {
        let path = VoicenavPaths::config_file()
            .map_err(|e| NavError::config(format!("Failed to locate config file: {}", e)))?;
        Ok(Self::with_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(NavConfig)`: parsed file, or all defaults if the file does not
    ///   exist or is empty
    /// - `Err(_)`: the file exists but cannot be read or parsed
    pub fn load(&self) -> Result<NavConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(NavConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            NavError::io(format!(
                "Failed to read config file at {:?}: {}",
                self.path, e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(NavConfig::default());
        }

        let config: NavConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

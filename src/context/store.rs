//! Config file I/O

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::context as context_config;
use crate::error::CliError;

use super::models::CliConfig;

/// Handles reading and writing the YAML config file
pub struct ConfigStore {
    config_path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create a new store using the default config path (~/.config/zeabur/cli.yaml)
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a store with a custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(context_config::DIR_NAME)
            .join(context_config::FILE_NAME)
    }

    /// Load the config from disk.
    /// Returns Default if the file doesn't exist, errors on a corrupt document.
    pub fn load(&self) -> Result<CliConfig, CliError> {
        if !self.config_path.exists() {
            debug!(
                "Config file {} not found, using defaults",
                self.config_path.display()
            );
            return Ok(CliConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            CliError::Config(format!(
                "Failed to read config {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(CliConfig::default());
        }

        serde_yml::from_str(&content).map_err(|e| {
            CliError::Config(format!(
                "Failed to parse config {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Save the config to disk.
    /// Writes a tmp file then renames it, creating the parent dir if needed.
    pub fn save(&self, config: &CliConfig) -> Result<(), CliError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let yaml = serde_yml::to_string(config)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;

        let tmp_path = self.config_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, &yaml).map_err(|e| {
            CliError::Config(format!(
                "Failed to write temp config file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        // The file holds the API token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, permissions).map_err(|e| {
                CliError::Config(format!("Failed to set permissions on config file: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.config_path).map_err(|e| {
            CliError::Config(format!(
                "Failed to rename temp config file to {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        debug!("Saved config to {}", self.config_path.display());
        Ok(())
    }
}

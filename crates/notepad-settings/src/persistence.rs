//! Settings Persistence
//!
//! Owns the configuration together with the file it was loaded from, and
//! writes it back on request.

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const APP_DIR: &str = "notepad";
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    path: PathBuf,
    config: Config,
}

impl SettingsPersistence {
    /// Default configuration bound to `path`, without touching the disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Config::default(),
        }
    }

    /// Platform configuration file, e.g. `~/.config/notepad/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load settings from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        if !path.exists() {
            info!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::new(path));
        }

        let config = Config::load_from_file(&path)?;
        info!(path = %path.display(), "Loaded settings");
        Ok(Self { path, config })
    }

    /// Load settings from the platform configuration file.
    ///
    /// An unreadable or invalid file is logged and replaced by defaults.
    pub fn load_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        match Self::load_or_default(&path) {
            Ok(persistence) => Ok(persistence),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Ignoring unusable settings file");
                Ok(Self::new(path))
            }
        }
    }

    /// Save settings, creating the parent directory if needed
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| SettingsError::Save {
                path: self.path.clone(),
                source,
            })?;
        }

        self.config.save_to_file(&self.path)?;
        info!(path = %self.path.display(), "Saved settings");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

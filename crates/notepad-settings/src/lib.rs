//! Notepad Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, EditorSettings, ViewSettings, MAX_TAB_WIDTH};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;

//! Configuration for notepad
//!
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Editor behaviour (line ending for new documents, tab width, undo depth)
//! - View geometry (glyph cell size and line padding)
//! - Recent files

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use notepad_editor::{EditorOptions, LineEnding, ViewMetrics};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted tab width
pub const MAX_TAB_WIDTH: usize = 16;

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Line ending for new documents; opened files keep their own
    pub line_ending: LineEnding,
    /// Spaces inserted for a Tab key press
    pub tab_width: usize,
    /// Maximum undoable edits, unlimited when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undo_limit: Option<usize>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::default(),
            tab_width: 4,
            undo_limit: None,
        }
    }
}

/// Text view geometry in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub char_width: f32,
    pub char_height: f32,
    /// Spacing above and below each line
    pub line_padding: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        let metrics = ViewMetrics::default();
        Self {
            char_width: metrics.char_width,
            char_height: metrics.char_height,
            line_padding: metrics.line_padding,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of recent files to track
    pub recent_files_count: usize,
    /// Most recent first
    pub recent_files: Vec<PathBuf>,
    pub editor: EditorSettings,
    pub view: ViewSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_files_count: 10,
            recent_files: Vec::new(),
            editor: EditorSettings::default(),
            view: ViewSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Save {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let tab_width = self.editor.tab_width;
        if !(1..=MAX_TAB_WIDTH).contains(&tab_width) {
            return Err(ConfigError::out_of_range("editor.tab_width", tab_width));
        }

        if self.editor.undo_limit == Some(0) {
            return Err(ConfigError::out_of_range("editor.undo_limit", 0));
        }

        let sizes = [
            ("view.char_width", self.view.char_width),
            ("view.char_height", self.view.char_height),
        ];
        for (key, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::out_of_range(key, value));
            }
        }

        let padding = self.view.line_padding;
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(ConfigError::out_of_range("view.line_padding", padding));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.recent_files_count);
    }

    /// View geometry as editor metrics
    pub fn view_metrics(&self) -> ViewMetrics {
        ViewMetrics::new(
            self.view.char_width,
            self.view.char_height,
            self.view.line_padding,
        )
    }

    /// Options for a new editor session
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            line_ending: self.editor.line_ending,
            tab_width: self.editor.tab_width,
            undo_limit: self.editor.undo_limit,
            metrics: self.view_metrics(),
        }
    }
}

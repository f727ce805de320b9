//! # Notepad
//!
//! A minimal plain-text editor: character-level editing on a row buffer,
//! unlimited (or bounded) undo/redo, raw file load/save and caret placement
//! from pixel coordinates.
//!
//! ## Architecture
//!
//! Notepad is organized as a workspace with multiple crates:
//!
//! 1. **notepad-editor** - Text buffer, reversible actions, caret geometry, editor session
//! 2. **notepad-settings** - Configuration file handling and persistence
//! 3. **notepad** - Command shell and the main binary that integrates both crates

pub mod shell;

pub use notepad_editor::{
    ActionDirection, ActionLog, BufferError, Coordinate, EditorError, EditorOptions, EditorResult,
    EditorState, Key, LineEnding, MonospaceMeasure, TextAction, TextBuffer, TextMeasure,
    ViewMetrics, SENTINEL,
};
pub use notepad_settings::{Config, SettingsError, SettingsPersistence};
pub use shell::{Command, Shell, ShellError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Text shown by the About command
pub fn about() -> String {
    format!("Notepad {VERSION} (built {BUILD_DATE})")
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, INFO otherwise
/// - Output on stderr, leaving stdout to the shell
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(tracing::Level::INFO.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

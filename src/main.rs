use anyhow::Context;
use clap::Parser;
use notepad::{init_logging, EditorState, SettingsPersistence, Shell};
use std::io;
use std::path::PathBuf;
use tracing::info;

/// A minimal plain-text editor driven from standard input
#[derive(Parser, Debug)]
#[command(name = "notepad", version, about)]
struct CliArgs {
    /// File to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Settings file (.toml or .json) instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    init_logging()?;
    info!(version = notepad::VERSION, "Starting notepad");

    let settings = match args.config {
        Some(path) => SettingsPersistence::load_or_default(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => SettingsPersistence::load_default()?,
    };

    let mut editor = EditorState::new(settings.config().editor_options());
    if let Some(path) = &args.file {
        editor
            .open_file(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }

    let mut shell = Shell::new(editor, Some(settings));
    shell.run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

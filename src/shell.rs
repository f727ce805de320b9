//! Line-driven front end for the editor
//!
//! Each input line is either a `:command` mirroring the File, Edit and Help
//! menus, or text typed at the caret.

use notepad_editor::{EditorState, Key, MonospaceMeasure};
use notepad_settings::SettingsPersistence;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors produced while parsing a shell line.
#[derive(Error, Debug, PartialEq)]
pub enum ShellError {
    #[error("Unknown command ':{0}'")]
    UnknownCommand(String),

    #[error("':{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}

/// One parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    New,
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    Undo,
    Redo,
    About,
    Quit,
    Print,
    Key(Key),
    Click { x: f32, y: f32 },
    /// Plain text typed at the caret
    Type(String),
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Self::Type(line.to_string()));
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "new" => Self::New,
            "open" => Self::Open(path_argument("open", argument)?),
            "save" => Self::Save,
            "saveas" => Self::SaveAs(path_argument("saveas", argument)?),
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "about" => Self::About,
            "quit" | "q" => Self::Quit,
            "print" | "p" => Self::Print,
            "enter" => Self::Key(Key::Enter),
            "tab" => Self::Key(Key::Tab),
            "bs" => Self::Key(Key::Backspace),
            "del" => Self::Key(Key::Delete),
            "left" => Self::Key(Key::Left),
            "right" => Self::Key(Key::Right),
            "up" => Self::Key(Key::Up),
            "down" => Self::Key(Key::Down),
            "click" => parse_click(argument)?,
            // "::text" types a line that starts with a colon
            _ if name.starts_with(':') => Self::Type(rest.to_string()),
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn path_argument(command: &'static str, argument: &str) -> Result<PathBuf, ShellError> {
    if argument.is_empty() {
        return Err(ShellError::MissingArgument {
            command,
            argument: "a file path",
        });
    }
    Ok(PathBuf::from(argument))
}

fn parse_click(argument: &str) -> Result<Command, ShellError> {
    let missing = ShellError::MissingArgument {
        command: "click",
        argument: "X and Y pixel offsets",
    };
    let mut parts = argument.split_whitespace();
    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
        return Err(missing);
    };

    let parse = |value: &str| {
        value
            .parse::<f32>()
            .map_err(|_| ShellError::InvalidNumber(value.to_string()))
    };
    Ok(Command::Click {
        x: parse(x)?,
        y: parse(y)?,
    })
}

/// Whether the loop keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Editor session driven by text commands
pub struct Shell {
    editor: EditorState,
    settings: Option<SettingsPersistence>,
    measure: MonospaceMeasure,
}

impl Shell {
    pub fn new(editor: EditorState, settings: Option<SettingsPersistence>) -> Self {
        let measure = MonospaceMeasure::new(editor.options().metrics.char_width);
        Self {
            editor,
            settings,
            measure,
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Read commands from `input` until `:quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command, &mut output)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(output, "error: {err}")?,
            }
        }

        if self.editor.is_modified() {
            warn!("Exiting with unsaved changes");
        }
        output.flush()
    }

    /// Apply one command, reporting failures on `output`
    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> io::Result<Flow> {
        debug!(?command, "Shell command");
        match command {
            Command::New => self.editor.new_file(),
            Command::Open(path) => match self.editor.open_file(&path) {
                Ok(()) => {
                    self.remember(path);
                    writeln!(output, "opened {} rows", self.editor.buffer().row_count())?;
                }
                Err(err) => writeln!(output, "error: {err}")?,
            },
            Command::Save => {
                if let Err(err) = self.editor.save() {
                    writeln!(output, "error: {err}")?;
                }
            }
            Command::SaveAs(path) => match self.editor.save_as(&path) {
                Ok(()) => self.remember(path),
                Err(err) => writeln!(output, "error: {err}")?,
            },
            Command::Undo => {
                if !self.editor.undo() {
                    writeln!(output, "nothing to undo")?;
                }
            }
            Command::Redo => {
                if !self.editor.redo() {
                    writeln!(output, "nothing to redo")?;
                }
            }
            Command::About => writeln!(output, "{}", crate::about())?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Print => self.print(output)?,
            Command::Key(key) => {
                self.editor.handle_key(key);
            }
            Command::Click { x, y } => {
                self.editor.click(&self.measure, x, y);
            }
            Command::Type(text) => {
                for key in text.chars().filter_map(Key::from_char) {
                    self.editor.handle_key(key);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn print<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let buffer = self.editor.buffer();
        for row in 0..buffer.row_count() {
            writeln!(output, "{:>4} | {}", row + 1, buffer.row_display_string(row))?;
        }

        let name = self
            .editor
            .file_path()
            .map_or_else(|| "untitled".to_string(), |path| path.display().to_string());
        let marker = if self.editor.is_modified() { " *" } else { "" };
        writeln!(output, "{}{} caret {}", name, marker, self.editor.caret())
    }

    fn remember(&mut self, path: PathBuf) {
        let Some(settings) = self.settings.as_mut() else {
            return;
        };
        settings.config_mut().add_recent_file(path);
        if let Err(err) = settings.save() {
            warn!(error = %err, "Failed to save recent files");
        }
    }
}

//! # Notepad Editor
//!
//! Editing core for notepad: a line-oriented text buffer whose every
//! character-level mutation is recorded as a reversible action.
//!
//! ## Core Components
//!
//! ### Text Management
//! - **TextBuffer**: the document as discrete rows; split rows keep a trailing
//!   carriage-return sentinel
//! - Character-level insert/delete with newline splitting and row merging
//! - Raw load/save with configurable on-disk line endings
//!
//! ### Undo/Redo
//! - **TextAction**: immutable insert/delete records replayed against the buffer
//! - **ActionLog**: linear undo and redo stacks; a fresh edit clears redo
//!
//! ### Caret Geometry
//! - Binary search from a pixel offset to a char index, and back
//! - Row clamping, click-to-caret and virtual canvas size
//!
//! ### Editor Session
//! - **EditorState**: buffer, caret, file path and modified flag, driven by
//!   [`Key`] input and the File/Edit menu actions
//!
//! ## Architecture
//!
//! ```text
//! EditorState (public API)
//!   ├── TextBuffer (rows + ActionLog)
//!   │     └── TextAction (Insert | Delete)
//!   └── caret (TextMeasure, ViewMetrics)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use notepad_editor::{EditorOptions, EditorState, Key};
//!
//! let mut editor = EditorState::new(EditorOptions::default());
//! for c in "hi".chars() {
//!     editor.handle_key(Key::Char(c));
//! }
//! editor.handle_key(Key::Enter);
//! assert_eq!(editor.buffer().row_count(), 2);
//!
//! editor.undo();
//! assert_eq!(editor.buffer().row_count(), 1);
//! ```

pub mod caret;
pub mod coordinate;
pub mod error;
pub mod key;
pub mod line_ending;
pub mod text_action;
pub mod text_buffer;

pub use caret::{MonospaceMeasure, TextMeasure, ViewMetrics};
pub use coordinate::{ActionDirection, Coordinate, SENTINEL};
pub use error::{BufferError, BufferResult, EditorError, EditorResult};
pub use key::Key;
pub use line_ending::LineEnding;
pub use text_action::{ActionLog, EditRecord, TextAction};
pub use text_buffer::TextBuffer;

use std::path::{Path, PathBuf};
use tracing::debug;

/// Tunables for an [`EditorState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorOptions {
    /// Line ending for documents that did not come from a file
    pub line_ending: LineEnding,
    /// Spaces inserted for a Tab key press
    pub tab_width: usize,
    /// Maximum undoable edits, `None` for unlimited
    pub undo_limit: Option<usize>,
    pub metrics: ViewMetrics,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::default(),
            tab_width: 1,
            undo_limit: None,
            metrics: ViewMetrics::default(),
        }
    }
}

/// Complete editor state managing buffer, caret and file association
pub struct EditorState {
    buffer: TextBuffer,
    caret: Coordinate,
    file_path: Option<PathBuf>,
    modified: bool,
    options: EditorOptions,
}

impl EditorState {
    /// Create a new editor with an empty document
    pub fn new(options: EditorOptions) -> Self {
        Self {
            buffer: Self::fresh_buffer(&options),
            caret: Coordinate::origin(),
            file_path: None,
            modified: false,
            options,
        }
    }

    fn fresh_buffer(options: &EditorOptions) -> TextBuffer {
        let mut buffer = match options.undo_limit {
            Some(limit) => TextBuffer::with_undo_limit(limit),
            None => TextBuffer::new(),
        };
        buffer.set_line_ending(options.line_ending);
        buffer
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn caret(&self) -> Coordinate {
        self.caret
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Check if document is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// File > New
    pub fn new_file(&mut self) {
        self.buffer = Self::fresh_buffer(&self.options);
        self.caret = Coordinate::origin();
        self.file_path = None;
        self.modified = false;
    }

    /// File > Open. On failure the current document is kept.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let mut buffer = Self::fresh_buffer(&self.options);
        buffer.do_load_file(path)?;

        self.buffer = buffer;
        self.caret = Coordinate::origin();
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// File > Save, to the path the document was opened from or last saved as
    pub fn save(&mut self) -> EditorResult<()> {
        let path = self.file_path.clone().ok_or(EditorError::NoFilePath)?;
        self.buffer.do_save_file(&path)?;
        self.modified = false;
        Ok(())
    }

    /// File > Save As
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        self.buffer.do_save_file(path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Apply a key press at the caret and return the new caret
    pub fn handle_key(&mut self, key: Key) -> Coordinate {
        match key {
            Key::Char(c) if c.is_control() => {
                debug!(ch = ?c, "Ignoring control character");
            }
            Key::Char(c) => self.insert_at_caret(c),
            Key::Enter => self.insert_at_caret(SENTINEL),
            Key::Tab => {
                for _ in 0..self.options.tab_width {
                    self.insert_at_caret(' ');
                }
            }
            Key::Backspace => self.delete_at_caret(ActionDirection::Forward),
            Key::Delete => self.delete_at_caret(ActionDirection::Backward),
            Key::Left => self.move_caret(-1, 0),
            Key::Right => self.move_caret(1, 0),
            Key::Up => self.move_caret(0, -1),
            Key::Down => self.move_caret(0, 1),
        }
        self.caret
    }

    fn insert_at_caret(&mut self, c: char) {
        let revision = self.buffer.revision();
        let caret = self
            .buffer
            .insert_char(self.caret, c, ActionDirection::Forward);
        self.settle_after_edit(revision, caret);
    }

    fn delete_at_caret(&mut self, dir: ActionDirection) {
        let revision = self.buffer.revision();
        let caret = self.buffer.delete_char(self.caret, dir);
        self.settle_after_edit(revision, caret);
    }

    fn settle_after_edit(&mut self, revision: u64, caret: Coordinate) {
        if self.buffer.revision() != revision {
            self.modified = true;
        }
        self.place_caret(caret);
    }

    fn move_caret(&mut self, dx: isize, dy: isize) {
        let column = self.caret.column as isize + dx;
        let row = self.caret.row as isize + dy;
        self.caret = caret::clamp_caret(&self.buffer, column, row);
    }

    fn place_caret(&mut self, point: Coordinate) {
        self.caret = caret::clamp_caret(&self.buffer, point.column as isize, point.row as isize);
    }

    /// Place the caret under a click at document-space pixel `(x, y)`
    pub fn click(&mut self, measure: &impl TextMeasure, x: f32, y: f32) -> Coordinate {
        self.caret = caret::caret_point_at(&self.buffer, measure, &self.options.metrics, x, y);
        self.caret
    }

    /// Edit > Undo. Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.buffer.do_undo() {
            Some(caret) => {
                self.place_caret(caret);
                self.modified = true;
                true
            }
            None => false,
        }
    }

    /// Edit > Redo. Returns `false` when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.buffer.do_redo() {
            Some(caret) => {
                self.place_caret(caret);
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.buffer.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.buffer.can_redo()
    }

    /// Pixel position of the caret in document space
    pub fn caret_pixel(&self, measure: &impl TextMeasure) -> (f32, f32) {
        caret::caret_pixel(&self.buffer, measure, &self.options.metrics, self.caret)
    }

    /// Size of the scrollable canvas
    pub fn virtual_size(&self) -> (f32, f32) {
        caret::virtual_size(&self.buffer, &self.options.metrics)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

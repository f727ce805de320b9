//! Line-oriented text buffer with a reversible edit log.
//!
//! The document is an ordered list of rows. A row produced by splitting a
//! longer line keeps a trailing [`SENTINEL`], so its stored length exceeds its
//! display length by one. Columns are char offsets, never byte offsets.
//!
//! The buffer is not thread-safe; share it behind external synchronisation.

use crate::coordinate::{ActionDirection, Coordinate, SENTINEL};
use crate::error::{BufferError, BufferResult, EditorError, EditorResult};
use crate::line_ending::{split_rows, LineEnding};
use crate::text_action::{ActionLog, EditRecord, TextAction};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Whether an edit comes from the user or from the undo/redo machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditOrigin {
    Fresh,
    Replay,
}

/// Document rows plus undo/redo history
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rows: Vec<String>,
    log: ActionLog,
    new_caret_position: Coordinate,
    line_ending: LineEnding,
    /// Incremented on every change to the rows
    revision: u64,
}

impl TextBuffer {
    /// Create a new empty text buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer that keeps at most `limit` undoable edits
    pub fn with_undo_limit(limit: usize) -> Self {
        Self {
            log: ActionLog::with_depth(limit),
            ..Self::default()
        }
    }

    /// Line ending used when saving
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Set the line ending used when saving
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Get the number of rows (0 for an empty document)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the document has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows as stored, sentinels included
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Stored content of `row`, including any trailing sentinel.
    ///
    /// Out-of-range rows read as an empty string.
    pub fn row_string(&self, row: usize) -> &str {
        self.rows.get(row).map_or("", String::as_str)
    }

    /// Content of `row` without its trailing sentinel
    pub fn row_display_string(&self, row: usize) -> &str {
        let line = self.row_string(row);
        line.strip_suffix(SENTINEL).unwrap_or(line)
    }

    /// Stored char length of `row`, 0 when out of range
    pub fn row_char_count(&self, row: usize) -> usize {
        self.row_string(row).chars().count()
    }

    /// Char length of `row` without its sentinel
    pub fn row_display_char_count(&self, row: usize) -> usize {
        self.row_display_string(row).chars().count()
    }

    /// Stored length of the longest row, 0 when the document is empty
    pub fn max_row_char_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Drop all rows and both action stacks
    pub fn clear_buffer(&mut self) {
        self.rows.clear();
        self.log.clear();
        self.new_caret_position = Coordinate::origin();
        self.bump_revision();
    }

    /// File > New on the buffer
    pub fn do_clear(&mut self) {
        self.clear_buffer();
    }

    /// Counter bumped whenever the rows change, including undo and redo
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Caret position produced by the most recent edit, undo or redo
    pub fn new_caret_position(&self) -> Coordinate {
        self.new_caret_position
    }

    /// Insert `ch` at `point` and record it for undo.
    ///
    /// A carriage return splits the row and lands the caret at the start of the
    /// new row; any other character lands it one column to the right. The
    /// column may reach the row's display length but never passes its
    /// sentinel. A line feed is rejected, as is any out-of-range target: both
    /// return `point` unchanged and record nothing.
    pub fn insert_char(&mut self, point: Coordinate, ch: char, dir: ActionDirection) -> Coordinate {
        self.apply_insert(point, ch, dir, EditOrigin::Fresh)
    }

    /// Delete one character relative to `point` and record it for undo.
    ///
    /// `Forward` removes the character before `point`, wrapping onto the
    /// previous row's sentinel at column 0. Other directions remove the
    /// character at `point`. Removing a sentinel joins the following row.
    pub fn delete_char(&mut self, point: Coordinate, dir: ActionDirection) -> Coordinate {
        self.apply_delete(point, dir, EditOrigin::Fresh)
    }

    pub(crate) fn replay_insert_char(
        &mut self,
        point: Coordinate,
        ch: char,
        dir: ActionDirection,
    ) -> Coordinate {
        self.apply_insert(point, ch, dir, EditOrigin::Replay)
    }

    pub(crate) fn replay_delete_char(&mut self, point: Coordinate, dir: ActionDirection) -> Coordinate {
        self.apply_delete(point, dir, EditOrigin::Replay)
    }

    fn apply_insert(
        &mut self,
        point: Coordinate,
        ch: char,
        dir: ActionDirection,
        origin: EditOrigin,
    ) -> Coordinate {
        let result = if ch == SENTINEL {
            self.insert_enter(point)
        } else {
            self.insert_regular_char(point, ch)
        };

        let caret = match result {
            Ok(after) => {
                self.bump_revision();
                if origin == EditOrigin::Fresh {
                    self.log
                        .record(TextAction::Insert(EditRecord::new(dir, ch, point, after)));
                }
                after
            }
            Err(reason) => {
                debug!(%point, ch = ?ch, %reason, "Insert rejected");
                point
            }
        };

        self.new_caret_position = caret;
        caret
    }

    fn insert_regular_char(&mut self, point: Coordinate, ch: char) -> BufferResult<Coordinate> {
        if ch == '\n' {
            return Err(BufferError::UnsupportedChar { ch });
        }

        if self.rows.is_empty() {
            ensure_origin(point)?;
            self.rows.push(ch.to_string());
        } else {
            let line = self.row_mut(point.row)?;
            let offset = insert_offset(line, point.column)?;
            line.insert(offset, ch);
        }

        Ok(Coordinate::new(point.column + 1, point.row))
    }

    fn insert_enter(&mut self, point: Coordinate) -> BufferResult<Coordinate> {
        if self.rows.is_empty() {
            ensure_origin(point)?;
            self.rows.push(SENTINEL.to_string());
            self.rows.push(String::new());
        } else {
            let line = self.row_mut(point.row)?;
            let offset = insert_offset(line, point.column)?;
            let tail = line.split_off(offset);
            line.push(SENTINEL);
            self.rows.insert(point.row + 1, tail);
        }

        Ok(Coordinate::new(0, point.row + 1))
    }

    fn apply_delete(&mut self, point: Coordinate, dir: ActionDirection, origin: EditOrigin) -> Coordinate {
        let result = self
            .resolve_delete_target(point, dir)
            .and_then(|target| self.delete_char_in_row(target).map(|ch| (target, ch)));

        let caret = match result {
            Ok((target, ch)) => {
                // A lone empty row is the empty document.
                if self.rows.len() == 1 && self.rows[0].is_empty() {
                    self.rows.clear();
                }
                self.bump_revision();
                if origin == EditOrigin::Fresh {
                    self.log
                        .record(TextAction::Delete(EditRecord::new(dir, ch, point, target)));
                }
                target
            }
            Err(reason) => {
                debug!(%point, %dir, %reason, "Delete rejected");
                point
            }
        };

        self.new_caret_position = caret;
        caret
    }

    fn resolve_delete_target(&self, point: Coordinate, dir: ActionDirection) -> BufferResult<Coordinate> {
        let column = if dir.deletes_before_caret() {
            point.column.checked_sub(1)
        } else {
            Some(point.column)
        };

        if let Some(column) = column {
            return Ok(Coordinate::new(column, point.row));
        }

        // Backspace at column 0 removes the previous row's last character.
        let row = point.row.checked_sub(1).ok_or(BufferError::StartOfDocument)?;
        if row >= self.rows.len() {
            return Err(BufferError::RowOutOfBounds {
                row,
                total: self.rows.len(),
            });
        }
        let length = self.row_char_count(row);
        let column = length
            .checked_sub(1)
            .ok_or(BufferError::ColumnOutOfBounds { column: 0, length })?;

        Ok(Coordinate::new(column, row))
    }

    fn delete_char_in_row(&mut self, target: Coordinate) -> BufferResult<char> {
        let total = self.rows.len();
        let line = self.row_mut(target.row)?;
        let length = line.chars().count();
        if target.column >= length {
            return Err(BufferError::ColumnOutOfBounds {
                column: target.column,
                length,
            });
        }

        let offset = byte_offset(line, target.column)?;
        let removed = line.remove(offset);

        if removed == SENTINEL && target.row + 1 < total {
            let next = self.rows.remove(target.row + 1);
            self.rows[target.row].push_str(&next);
        }

        Ok(removed)
    }

    fn row_mut(&mut self, row: usize) -> BufferResult<&mut String> {
        let total = self.rows.len();
        self.rows
            .get_mut(row)
            .ok_or(BufferError::RowOutOfBounds { row, total })
    }

    /// Revert the most recent edit.
    ///
    /// Returns the caret position before that edit, or `None` when there is
    /// nothing to undo.
    pub fn do_undo(&mut self) -> Option<Coordinate> {
        let action = self.log.pop_undo()?;
        action.undo(self);
        self.new_caret_position = action.action_position();
        debug!(action = ?action, "Undo");
        self.log.push_redo(action);
        Some(self.new_caret_position)
    }

    /// Re-apply the most recently reverted edit.
    ///
    /// Returns the caret position after that edit, or `None` when there is
    /// nothing to redo.
    pub fn do_redo(&mut self) -> Option<Coordinate> {
        let action = self.log.pop_redo()?;
        action.redo(self);
        self.new_caret_position = action.after_action_position();
        debug!(action = ?action, "Redo");
        self.log.push_undo(action);
        Some(self.new_caret_position)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// Number of undoable edits
    pub fn undo_count(&self) -> usize {
        self.log.undo_count()
    }

    /// Number of redoable edits
    pub fn redo_count(&self) -> usize {
        self.log.redo_count()
    }

    /// The undo and redo stacks
    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// Replace the document with text read from `reader`.
    ///
    /// Any of `\r\n`, `\r` or `\n` ends a row; the first one seen becomes the
    /// buffer's line ending. Invalid UTF-8 fails with
    /// [`io::ErrorKind::InvalidData`]. On error the buffer is left untouched.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> io::Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let (rows, detected) = split_rows(&text);
        self.clear_buffer();
        self.rows = rows;
        if let Some(line_ending) = detected {
            self.line_ending = line_ending;
        }
        Ok(())
    }

    /// Write every row in order, each trailing sentinel as the buffer's line ending
    pub fn save_to_writer<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let terminator = self.line_ending.as_str().as_bytes();
        for row in &self.rows {
            match row.strip_suffix(SENTINEL) {
                Some(display) => {
                    writer.write_all(display.as_bytes())?;
                    writer.write_all(terminator)?;
                }
                None => writer.write_all(row.as_bytes())?,
            }
        }
        writer.flush()
    }

    /// Replace the document with the content of the file at `path`
    pub fn do_load_file(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EditorError::CannotOpen {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_from_reader(BufReader::new(file))
            .map_err(|source| match source.kind() {
                io::ErrorKind::InvalidData => EditorError::InvalidEncoding {
                    path: path.to_path_buf(),
                },
                _ => EditorError::CannotOpen {
                    path: path.to_path_buf(),
                    source,
                },
            })?;

        info!(
            path = %path.display(),
            rows = self.row_count(),
            line_ending = %self.line_ending,
            "Loaded file"
        );
        Ok(())
    }

    /// Write the document to the file at `path`, replacing it
    pub fn do_save_file(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let cannot_write = |source| EditorError::CannotWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(cannot_write)?;
        self.save_to_writer(BufWriter::new(file))
            .map_err(cannot_write)?;

        info!(
            path = %path.display(),
            rows = self.row_count(),
            line_ending = %self.line_ending,
            "Saved file"
        );
        Ok(())
    }
}

/// Byte offset of char `column` in `line`; `column` may equal the char count.
fn byte_offset(line: &str, column: usize) -> BufferResult<usize> {
    match line.char_indices().nth(column) {
        Some((offset, _)) => Ok(offset),
        None => {
            let length = line.chars().count();
            if column == length {
                Ok(line.len())
            } else {
                Err(BufferError::ColumnOutOfBounds { column, length })
            }
        }
    }
}

/// Byte offset for inserting at char `column`; never past a trailing sentinel.
fn insert_offset(line: &str, column: usize) -> BufferResult<usize> {
    byte_offset(line.strip_suffix(SENTINEL).unwrap_or(line), column)
}

fn ensure_origin(point: Coordinate) -> BufferResult<()> {
    if point == Coordinate::origin() {
        Ok(())
    } else {
        Err(BufferError::NotAtOrigin {
            column: point.column,
            row: point.row,
        })
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        let (rows, detected) = split_rows(text);
        Self {
            rows,
            line_ending: detected.unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            f.write_str(row)?;
        }
        Ok(())
    }
}

//! Reversible edit records and the undo/redo stacks that hold them.
//!
//! A [`TextAction`] is plain data: it never points back at the buffer it was
//! recorded against. Reverting or re-applying one takes the buffer explicitly
//! and goes through the buffer's replay primitives, which do not record new
//! actions.

use crate::coordinate::{ActionDirection, Coordinate};
use crate::text_buffer::TextBuffer;

/// Fields common to every character-level edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRecord {
    /// Direction the caret moved when the edit was applied
    pub direction: ActionDirection,
    /// The character that was added or removed
    pub ch: char,
    /// Caret position before the edit
    pub action_position: Coordinate,
    /// Caret position after the edit
    pub after_action_position: Coordinate,
}

impl EditRecord {
    /// Create a record from the edit's direction, char and caret positions
    pub fn new(
        direction: ActionDirection,
        ch: char,
        action_position: Coordinate,
        after_action_position: Coordinate,
    ) -> Self {
        Self {
            direction,
            ch,
            action_position,
            after_action_position,
        }
    }
}

/// One atomic character-level edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    /// A character was added
    Insert(EditRecord),
    /// A character was removed
    Delete(EditRecord),
}

impl TextAction {
    /// Fields shared by both variants
    pub fn record(&self) -> &EditRecord {
        match self {
            Self::Insert(record) | Self::Delete(record) => record,
        }
    }

    /// Direction the caret moved
    pub fn direction(&self) -> ActionDirection {
        self.record().direction
    }

    /// Character added or removed
    pub fn ch(&self) -> char {
        self.record().ch
    }

    /// Caret position before the edit
    pub fn action_position(&self) -> Coordinate {
        self.record().action_position
    }

    /// Caret position after the edit
    pub fn after_action_position(&self) -> Coordinate {
        self.record().after_action_position
    }

    /// Check if this edit added a character
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    /// Revert this edit on `buffer`.
    pub(crate) fn undo(&self, buffer: &mut TextBuffer) -> Coordinate {
        match self {
            // The after-action position always sits just past the inserted
            // character, so it is removed backspace-style.
            Self::Insert(record) => {
                buffer.replay_delete_char(record.after_action_position, ActionDirection::Forward)
            }
            Self::Delete(record) => buffer.replay_insert_char(
                record.after_action_position,
                record.ch,
                record.direction,
            ),
        }
    }

    /// Re-apply this edit on `buffer`.
    pub(crate) fn redo(&self, buffer: &mut TextBuffer) -> Coordinate {
        match self {
            Self::Insert(record) => {
                buffer.replay_insert_char(record.action_position, record.ch, record.direction)
            }
            Self::Delete(record) => {
                buffer.replay_delete_char(record.action_position, record.direction)
            }
        }
    }
}

/// The undo and redo stacks, most recent last.
///
/// An action lives on exactly one stack at a time.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    undo_stack: Vec<TextAction>,
    redo_stack: Vec<TextAction>,
    max_depth: Option<usize>,
}

impl ActionLog {
    /// Create a log with unlimited undo depth
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `max_depth` undoable actions
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }

    /// Depth limit, `None` when unlimited
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Record a fresh edit. Invalidates any redo history.
    pub fn record(&mut self, action: TextAction) {
        self.redo_stack.clear();
        self.undo_stack.push(action);

        if let Some(max_depth) = self.max_depth {
            if self.undo_stack.len() > max_depth {
                let excess = self.undo_stack.len() - max_depth;
                self.undo_stack.drain(..excess);
            }
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<TextAction> {
        self.undo_stack.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<TextAction> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_undo(&mut self, action: TextAction) {
        self.undo_stack.push(action);
    }

    pub(crate) fn push_redo(&mut self, action: TextAction) {
        self.redo_stack.push(action);
    }

    /// Most recent undoable action
    pub fn last_undo(&self) -> Option<&TextAction> {
        self.undo_stack.last()
    }

    /// Most recent redoable action
    pub fn last_redo(&self) -> Option<&TextAction> {
        self.redo_stack.last()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable actions
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable actions
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(ch: char, column: usize) -> TextAction {
        TextAction::Insert(EditRecord::new(
            ActionDirection::Forward,
            ch,
            Coordinate::new(column, 0),
            Coordinate::new(column + 1, 0),
        ))
    }

    #[test]
    fn test_record_clears_redo() {
        let mut log = ActionLog::new();
        log.record(insert('a', 0));
        let action = log.pop_undo().unwrap();
        log.push_redo(action);
        assert!(log.can_redo());

        log.record(insert('b', 0));
        assert!(!log.can_redo());
        assert_eq!(log.undo_count(), 1);
    }

    #[test]
    fn test_depth_limit_drops_oldest() {
        let mut log = ActionLog::with_depth(2);
        log.record(insert('a', 0));
        log.record(insert('b', 1));
        log.record(insert('c', 2));

        assert_eq!(log.undo_count(), 2);
        assert_eq!(log.last_undo().map(TextAction::ch), Some('c'));
        let _ = log.pop_undo();
        assert_eq!(log.last_undo().map(TextAction::ch), Some('b'));
    }

    #[test]
    fn test_accessors() {
        let action = insert('x', 4);
        assert!(action.is_insert());
        assert_eq!(action.direction(), ActionDirection::Forward);
        assert_eq!(action.action_position(), Coordinate::new(4, 0));
        assert_eq!(action.after_action_position(), Coordinate::new(5, 0));
    }

    #[test]
    fn test_insert_undo_and_redo_replay_on_buffer() {
        let mut buffer = TextBuffer::from("ac");
        let action = TextAction::Insert(EditRecord::new(
            ActionDirection::Forward,
            'b',
            Coordinate::new(1, 0),
            Coordinate::new(2, 0),
        ));

        assert_eq!(action.redo(&mut buffer), Coordinate::new(2, 0));
        assert_eq!(buffer.row_string(0), "abc");
        assert_eq!(action.undo(&mut buffer), Coordinate::new(1, 0));
        assert_eq!(buffer.row_string(0), "ac");
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_delete_undo_and_redo_replay_on_buffer() {
        let mut buffer = TextBuffer::from("abc");
        let action = TextAction::Delete(EditRecord::new(
            ActionDirection::Backward,
            'b',
            Coordinate::new(1, 0),
            Coordinate::new(1, 0),
        ));

        action.redo(&mut buffer);
        assert_eq!(buffer.row_string(0), "ac");
        action.undo(&mut buffer);
        assert_eq!(buffer.row_string(0), "abc");
        assert!(!buffer.can_undo());
    }
}

//! Toolkit-independent key input handled by [`EditorState`](crate::EditorState).

/// A key press the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character produced by the keyboard
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map a raw character to a key.
    ///
    /// Carriage return and line feed are both Enter; backspace and DEL map to
    /// their editing keys; other control characters are ignored.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\r' | '\n' => Some(Self::Enter),
            '\t' => Some(Self::Tab),
            '\u{8}' => Some(Self::Backspace),
            '\u{7f}' => Some(Self::Delete),
            c if c.is_control() => None,
            c => Some(Self::Char(c)),
        }
    }
}

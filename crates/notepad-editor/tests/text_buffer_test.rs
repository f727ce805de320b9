use notepad_editor::{ActionDirection, Coordinate, TextBuffer, SENTINEL};

const FWD: ActionDirection = ActionDirection::Forward;
const BACK: ActionDirection = ActionDirection::Backward;

fn type_text(buffer: &mut TextBuffer, text: &str) -> Coordinate {
    let mut caret = Coordinate::origin();
    for c in text.chars() {
        caret = buffer.insert_char(caret, c, FWD);
    }
    caret
}

#[test]
fn test_create_empty() {
    let buffer = TextBuffer::new();
    assert_eq!(buffer.row_count(), 0);
    assert_eq!(buffer.max_row_char_count(), 0);
    assert!(buffer.is_empty());
    assert!(!buffer.can_undo());
    assert!(!buffer.can_redo());
}

#[test]
fn test_create_from_str() {
    let buffer = TextBuffer::from("Hello\rWorld");
    assert_eq!(buffer.row_count(), 2);
    assert_eq!(buffer.row_string(0), "Hello\r");
    assert_eq!(buffer.row_display_string(0), "Hello");
    assert_eq!(buffer.row_char_count(0), 6);
    assert_eq!(buffer.row_display_char_count(0), 5);
    assert_eq!(buffer.row_string(1), "World");
    assert_eq!(buffer.row_display_char_count(1), 5);
}

#[test]
fn test_defensive_reads() {
    let buffer = TextBuffer::from("abc");
    assert_eq!(buffer.row_string(1), "");
    assert_eq!(buffer.row_string(usize::MAX), "");
    assert_eq!(buffer.row_display_string(7), "");
    assert_eq!(buffer.row_char_count(3), 0);
    assert_eq!(buffer.row_display_char_count(3), 0);
}

#[test]
fn test_first_char_creates_first_row() {
    let mut buffer = TextBuffer::new();
    let caret = buffer.insert_char(Coordinate::origin(), 'a', FWD);
    assert_eq!(caret, Coordinate::new(1, 0));
    assert_eq!(buffer.row_count(), 1);
    assert_eq!(buffer.row_string(0), "a");
    assert!(buffer.can_undo());
}

#[test]
fn test_insert_at_end_of_row() {
    let mut buffer = TextBuffer::from("abc");
    let len = buffer.row_char_count(0);
    let caret = buffer.insert_char(Coordinate::new(len, 0), 'x', FWD);
    assert_eq!(caret, Coordinate::new(len + 1, 0));
    assert_eq!(buffer.row_string(0), "abcx");
}

#[test]
fn test_insert_past_end_of_row_is_rejected() {
    let mut buffer = TextBuffer::from("abc");
    let point = Coordinate::new(4, 0);
    assert_eq!(buffer.insert_char(point, 'x', FWD), point);
    assert_eq!(buffer.row_string(0), "abc");
    assert!(!buffer.can_undo());

    let point = Coordinate::new(0, 1);
    assert_eq!(buffer.insert_char(point, 'x', FWD), point);
    assert_eq!(buffer.row_count(), 1);
}

#[test]
fn test_insert_never_passes_sentinel() {
    let mut buffer = TextBuffer::from("aa\rbb");

    let point = Coordinate::new(3, 0);
    assert_eq!(buffer.insert_char(point, 'x', FWD), point);
    assert_eq!(buffer.insert_char(point, SENTINEL, FWD), point);
    assert_eq!(buffer.rows(), ["aa\r", "bb"]);
    assert!(!buffer.can_undo());

    // The display end is still a valid insert position
    let caret = buffer.insert_char(Coordinate::new(2, 0), 'x', FWD);
    assert_eq!(caret, Coordinate::new(3, 0));
    assert_eq!(buffer.rows(), ["aax\r", "bb"]);

    let caret = buffer.insert_char(Coordinate::new(3, 0), SENTINEL, FWD);
    assert_eq!(caret, Coordinate::new(0, 1));
    assert_eq!(buffer.rows(), ["aax\r", "\r", "bb"]);
}

#[test]
fn test_line_feed_is_rejected() {
    let mut buffer = TextBuffer::from("ab");
    let point = Coordinate::new(1, 0);
    assert_eq!(buffer.insert_char(point, '\n', FWD), point);
    assert_eq!(buffer.rows(), ["ab"]);
    assert!(!buffer.can_undo());

    let mut empty = TextBuffer::new();
    empty.insert_char(Coordinate::origin(), '\n', FWD);
    assert!(empty.is_empty());
}

#[test]
fn test_edits_around_sentinel_undo_to_empty() {
    let mut buffer = TextBuffer::new();
    let mut caret = Coordinate::origin();
    for c in "aa\raaa".chars() {
        caret = buffer.insert_char(caret, c, FWD);
    }
    buffer.insert_char(Coordinate::new(3, 0), 'a', FWD);
    buffer.delete_char(Coordinate::new(2, 0), BACK);
    assert_eq!(buffer.rows(), ["aaaaa"]);

    while buffer.can_undo() {
        buffer.do_undo();
    }
    assert_eq!(buffer.row_count(), 0);
}

#[test]
fn test_split_semantics() {
    let mut buffer = TextBuffer::from("abcdef");
    let caret = buffer.insert_char(Coordinate::new(3, 0), SENTINEL, FWD);
    assert_eq!(caret, Coordinate::new(0, 1));
    assert_eq!(buffer.row_count(), 2);
    assert_eq!(buffer.row_string(0), "abc\r");
    assert_eq!(buffer.row_string(1), "def");
}

#[test]
fn test_split_at_row_edges() {
    let mut buffer = TextBuffer::from("abc");
    buffer.insert_char(Coordinate::new(0, 0), SENTINEL, FWD);
    assert_eq!(buffer.rows(), ["\r", "abc"]);

    let caret = buffer.insert_char(Coordinate::new(3, 1), SENTINEL, FWD);
    assert_eq!(caret, Coordinate::new(0, 2));
    assert_eq!(buffer.rows(), ["\r", "abc\r", ""]);
}

#[test]
fn test_split_middle_row_keeps_order() {
    let mut buffer = TextBuffer::from("one\rtwo\rthree");
    let caret = buffer.insert_char(Coordinate::new(1, 1), SENTINEL, FWD);
    assert_eq!(caret, Coordinate::new(0, 2));
    assert_eq!(buffer.rows(), ["one\r", "t\r", "wo\r", "three"]);
}

#[test]
fn test_backspace_at_row_start_merges_rows() {
    let mut buffer = TextBuffer::from("abc\rdef");
    let caret = buffer.delete_char(Coordinate::new(0, 1), FWD);
    assert_eq!(caret, Coordinate::new(3, 0));
    assert_eq!(buffer.row_count(), 1);
    assert_eq!(buffer.row_string(0), "abcdef");
}

#[test]
fn test_delete_sentinel_merges_rows() {
    let mut buffer = TextBuffer::from("abc\rdef");
    let caret = buffer.delete_char(Coordinate::new(3, 0), BACK);
    assert_eq!(caret, Coordinate::new(3, 0));
    assert_eq!(buffer.rows(), ["abcdef"]);
}

#[test]
fn test_delete_sentinel_on_last_row() {
    let mut buffer = TextBuffer::from("abc\r");
    assert_eq!(buffer.rows(), ["abc\r", ""]);
    buffer.delete_char(Coordinate::new(3, 0), BACK);
    assert_eq!(buffer.rows(), ["abc"]);
}

#[test]
fn test_backspace_and_delete_directions() {
    let mut buffer = TextBuffer::from("abcd");
    let caret = buffer.delete_char(Coordinate::new(2, 0), FWD);
    assert_eq!(caret, Coordinate::new(1, 0));
    assert_eq!(buffer.row_string(0), "acd");

    let caret = buffer.delete_char(Coordinate::new(1, 0), BACK);
    assert_eq!(caret, Coordinate::new(1, 0));
    assert_eq!(buffer.row_string(0), "ad");

    // Upward and downward delete the char at the caret like backward
    buffer.delete_char(Coordinate::new(0, 0), ActionDirection::Upward);
    assert_eq!(buffer.row_string(0), "d");
}

#[test]
fn test_delete_with_nothing_there_is_noop() {
    let mut buffer = TextBuffer::from("abc\rdef");

    let point = Coordinate::new(0, 0);
    assert_eq!(buffer.delete_char(point, FWD), point);

    let point = Coordinate::new(3, 1);
    assert_eq!(buffer.delete_char(point, BACK), point);

    let point = Coordinate::new(0, 5);
    assert_eq!(buffer.delete_char(point, BACK), point);

    assert_eq!(buffer.rows(), ["abc\r", "def"]);
    assert!(!buffer.can_undo());
}

#[test]
fn test_backspace_wraps_onto_previous_sentinel() {
    let mut buffer = TextBuffer::from("x\r");
    let caret = buffer.delete_char(Coordinate::new(0, 1), FWD);
    assert_eq!(caret, Coordinate::new(1, 0));
    assert_eq!(buffer.rows(), ["x"]);
}

#[test]
fn test_deleting_last_char_empties_document() {
    let mut buffer = TextBuffer::new();
    let caret = buffer.insert_char(Coordinate::origin(), 'a', FWD);
    let caret = buffer.delete_char(caret, FWD);
    assert_eq!(caret, Coordinate::origin());
    assert_eq!(buffer.row_count(), 0);

    let caret = buffer.insert_char(Coordinate::origin(), SENTINEL, FWD);
    buffer.delete_char(caret, FWD);
    assert_eq!(buffer.row_count(), 0);
}

#[test]
fn test_max_row_char_count_uses_stored_length() {
    let buffer = TextBuffer::from("abcd\rxy\rlonger!");
    assert_eq!(buffer.max_row_char_count(), 7);

    let buffer = TextBuffer::from("abcd\rxy");
    assert_eq!(buffer.max_row_char_count(), 5);
}

#[test]
fn test_clear_is_idempotent() {
    let mut buffer = TextBuffer::new();
    type_text(&mut buffer, "hello");
    buffer.do_clear();
    assert_eq!(buffer.row_count(), 0);
    assert!(!buffer.can_undo());
    assert!(!buffer.can_redo());

    buffer.clear_buffer();
    assert_eq!(buffer.row_count(), 0);
    assert_eq!(buffer.new_caret_position(), Coordinate::origin());
}

#[test]
fn test_typing_builds_rows() {
    let mut buffer = TextBuffer::new();
    let caret = type_text(&mut buffer, "ab\rcd");
    assert_eq!(caret, Coordinate::new(2, 1));
    assert_eq!(buffer.rows(), ["ab\r", "cd"]);
    assert_eq!(buffer.to_string(), "ab\rcd");
    assert_eq!(buffer.undo_count(), 5);
}

#[test]
fn test_revision_tracks_successful_changes() {
    let mut buffer = TextBuffer::new();
    let start = buffer.revision();
    buffer.insert_char(Coordinate::new(3, 3), 'x', FWD);
    assert_eq!(buffer.revision(), start);

    let caret = buffer.insert_char(Coordinate::origin(), 'x', FWD);
    assert_eq!(buffer.revision(), start + 1);

    buffer.delete_char(caret, FWD);
    assert_eq!(buffer.revision(), start + 2);

    buffer.do_undo();
    assert_eq!(buffer.revision(), start + 3);
}

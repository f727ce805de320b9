//! Caret geometry: mapping between pixel offsets and buffer coordinates.
//!
//! Pixel widths come from a [`TextMeasure`] supplied by the view. The search
//! relies on the measured width growing monotonically with the prefix length.

use crate::coordinate::Coordinate;
use crate::text_buffer::TextBuffer;

/// Text measurement service provided by the view layer.
pub trait TextMeasure {
    /// Rendered width of `text` in pixels
    fn text_width(&self, text: &str) -> f32;

    /// Nominal width of a single character in pixels
    fn char_width(&self) -> f32;
}

/// Fixed-pitch measurement: every char is `char_width` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    char_width: f32,
}

impl MonospaceMeasure {
    pub fn new(char_width: f32) -> Self {
        Self { char_width }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn char_width(&self) -> f32 {
        self.char_width
    }
}

/// Font cell size and line spacing used to lay rows out vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMetrics {
    pub char_width: f32,
    pub char_height: f32,
    /// Spacing above and below each line
    pub line_padding: f32,
}

impl ViewMetrics {
    pub fn new(char_width: f32, char_height: f32, line_padding: f32) -> Self {
        Self {
            char_width,
            char_height,
            line_padding,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.line_padding + self.char_height + self.line_padding
    }
}

impl Default for ViewMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0, 1.0)
    }
}

/// Width of the first `len` chars of `line`
pub fn line_width(measure: &impl TextMeasure, line: &str, len: usize) -> f32 {
    let end = line
        .char_indices()
        .nth(len)
        .map_or(line.len(), |(offset, _)| offset);
    measure.text_width(&line[..end])
}

/// Char index in `line` closest to the pixel offset `x`.
///
/// Binary search over `[0, len)`. A midpoint is accepted as soon as its prefix
/// width is within half a nominal char width of `x`; otherwise the search
/// narrows towards `x`. When the range empties its start is returned, so the
/// result lies in `[0, len]`.
pub fn char_index_at(measure: &impl TextMeasure, line: &str, x: f32) -> usize {
    let len = line.chars().count();
    let tolerance = measure.char_width() / 2.0;

    let mut begin = 0;
    let mut end = len;
    while begin < end {
        let mid = begin + (end - begin) / 2;
        let width = line_width(measure, line, mid);

        if (width - x).abs() < tolerance {
            return mid;
        } else if x > width {
            begin = mid + 1;
        } else {
            end = mid;
        }
    }
    begin
}

/// Clamp a possibly out-of-range caret onto the document.
///
/// The row is clamped to the existing rows and the column to the row's
/// display length, so the caret never sits after a sentinel.
pub fn clamp_caret(buffer: &TextBuffer, column: isize, row: isize) -> Coordinate {
    let last_row = buffer.row_count().saturating_sub(1);
    let row = usize::try_from(row).unwrap_or(0).min(last_row);
    let column = usize::try_from(column)
        .unwrap_or(0)
        .min(buffer.row_display_char_count(row));
    Coordinate::new(column, row)
}

/// Buffer coordinate under the pixel position `(x, y)` in document space
pub fn caret_point_at(
    buffer: &TextBuffer,
    measure: &impl TextMeasure,
    metrics: &ViewMetrics,
    x: f32,
    y: f32,
) -> Coordinate {
    let last_row = buffer.row_count().saturating_sub(1);
    let row = if y <= 0.0 {
        0
    } else {
        ((y / metrics.line_height()) as usize).min(last_row)
    };
    let column = char_index_at(measure, buffer.row_display_string(row), x);
    Coordinate::new(column, row)
}

/// Top-left pixel position of the caret at `point`, in document space
pub fn caret_pixel(
    buffer: &TextBuffer,
    measure: &impl TextMeasure,
    metrics: &ViewMetrics,
    point: Coordinate,
) -> (f32, f32) {
    let x = line_width(measure, buffer.row_display_string(point.row), point.column);
    let y = point.row as f32 * metrics.line_height();
    (x, y)
}

/// Size of the scrollable canvas, with one spare cell in each direction
pub fn virtual_size(buffer: &TextBuffer, metrics: &ViewMetrics) -> (f32, f32) {
    let width = (buffer.max_row_char_count() + 1) as f32 * metrics.char_width;
    let height = (buffer.row_count() + 1) as f32 * metrics.line_height();
    (width, height)
}

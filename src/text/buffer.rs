//! Line-oriented plain-text storage.
//!
//! This module provides [`TextBuffer`], the authoritative text of a document
//! stored as a list of lines. Every line except the last keeps its trailing
//! `\n`, so concatenating the lines reproduces the text verbatim. Columns
//! are counted in `char`s against a line's content, i.e. excluding the
//! trailing newline.
//!
//! Edits never fail: positions outside the document are clamped, and
//! deletes at document edges are no-ops that return the unchanged position.

use std::fmt;

/// Splits text into lines, keeping each line's terminating `\n`.
///
/// The final fragment never ends with `\n` and may be empty, so the result
/// always has at least one element and `prepare_text(t).concat() == t`.
///
/// ```
/// use canvas_text_core::text::prepare_text;
///
/// let lines = prepare_text("Line1\n\nLine3\nLine4");
/// assert_eq!(lines, ["Line1\n", "\n", "Line3\n", "Line4"]);
/// assert_eq!(prepare_text("tail\n"), ["tail\n", ""]);
/// ```
#[must_use]
pub fn prepare_text(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_owned).collect();
    if text.is_empty() || text.ends_with('\n') {
        lines.push(String::new());
    }
    lines
}

/// Read-only view of a document's geometry.
///
/// This is everything the selection engine needs to know about a document
/// to keep positions inside it.
pub trait DocumentBounds {
    /// Number of lines, at least one.
    fn line_count(&self) -> usize;

    /// Content length of a line in chars, excluding its trailing `\n`.
    ///
    /// Returns 0 for rows that do not exist.
    fn line_len(&self, row: usize) -> usize;
}

/// Plain-text buffer stored as an ordered list of lines.
///
/// `TextBuffer` owns the document text and exposes read access plus the two
/// fundamental mutators: [`insert_text`](Self::insert_text) and
/// [`delete_range`](Self::delete_range). Both return the position where the
/// caret belongs after the edit; feed it to
/// [`SelectionEngine::set_position`](super::SelectionEngine::set_position).
///
/// # Examples
///
/// ```
/// use canvas_text_core::TextBuffer;
///
/// let mut buffer = TextBuffer::with_text("Hello\nWorld");
/// assert_eq!(buffer.line_count(), 2);
/// assert_eq!(buffer.line(0), Some("Hello\n"));
///
/// let caret = buffer.insert_text(", there", 5, 0);
/// assert_eq!(caret, (12, 0));
/// assert_eq!(buffer.to_string(), "Hello, there\nWorld");
///
/// // Backspace at column 0 of row 1 joins the lines.
/// let caret = buffer.delete_char(false, 0, 1);
/// assert_eq!(caret, (12, 0));
/// assert_eq!(buffer.line_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer (a single empty line).
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Create a buffer with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            lines: prepare_text(text),
        }
    }

    /// Replace the entire content.
    pub fn set_text(&mut self, text: &str) {
        self.lines = prepare_text(text);
        tracing::debug!(lines = self.lines.len(), "buffer text replaced");
    }

    /// Number of lines. Always at least one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line including its trailing `\n`, if any.
    ///
    /// Returns `None` for rows past the end; no clamping happens here.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Get a line's content without its trailing `\n`.
    #[must_use]
    pub fn line_content(&self, index: usize) -> Option<&str> {
        self.line(index).map(|line| line.strip_suffix('\n').unwrap_or(line))
    }

    /// Iterate over all lines, terminators included.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Content length of a line in chars. Missing rows have length 0.
    #[must_use]
    pub fn line_len(&self, index: usize) -> usize {
        self.line_content(index).map_or(0, |line| line.chars().count())
    }

    /// Total number of chars in the document, newlines included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.iter().map(|line| line.chars().count()).sum()
    }

    /// Check whether the document holds no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Get the char at a position.
    ///
    /// Returns `None` if the row does not exist or `column` is past the
    /// line's raw length. The line break of a non-final line is reported at
    /// the column just after its content.
    #[must_use]
    pub fn char_at(&self, column: usize, row: usize) -> Option<char> {
        self.lines.get(row)?.chars().nth(column)
    }

    /// Insert text at a position and return the caret position after it.
    ///
    /// The row is clamped to the last line and the column to that line's
    /// content length. Inserting an empty string changes nothing and returns
    /// the (clamped) input position.
    pub fn insert_text(&mut self, text: &str, column: usize, row: usize) -> (usize, usize) {
        let row = row.min(self.last_row());
        let column = column.min(self.line_len(row));
        if text.is_empty() {
            return (column, row);
        }

        let mut fragments = prepare_text(text);
        let fragment_count = fragments.len();
        let last_len = fragments[fragment_count - 1].chars().count();

        let line = &self.lines[row];
        let split = byte_offset(line, column);
        let tail = line[split..].to_owned();
        fragments[0].insert_str(0, &line[..split]);
        fragments[fragment_count - 1].push_str(&tail);

        let caret = if fragment_count == 1 {
            tracing::trace!(row, column, len = last_len, "single-line insert");
            (column + last_len, row)
        } else {
            tracing::debug!(row, column, new_lines = fragment_count - 1, "multi-line insert");
            (last_len, row + fragment_count - 1)
        };

        self.lines.splice(row..=row, fragments);
        self.debug_check();
        caret
    }

    /// Delete the text between two positions, end exclusive.
    ///
    /// The start is clamped into the document, the end row to the last line
    /// and the end column to the end row's content length (never past its
    /// line break). If the clamped start is not before the clamped end this
    /// is a no-op. Returns the clamped start position.
    pub fn delete_range(
        &mut self,
        start_column: usize,
        start_row: usize,
        end_column: usize,
        end_row: usize,
    ) -> (usize, usize) {
        let ((start_column, start_row), (end_column, end_row)) =
            self.clamp_range(start_column, start_row, end_column, end_row);
        if (start_row, start_column) >= (end_row, end_column) {
            return (start_column, start_row);
        }

        let head_end = byte_offset(&self.lines[start_row], start_column);
        let tail_start = byte_offset(&self.lines[end_row], end_column);
        let mut joined = self.lines[start_row][..head_end].to_owned();
        joined.push_str(&self.lines[end_row][tail_start..]);

        if start_row == end_row {
            tracing::trace!(row = start_row, start_column, end_column, "delete within line");
        } else {
            tracing::debug!(start_row, end_row, "delete across lines");
        }

        self.lines.splice(start_row..=end_row, std::iter::once(joined));
        self.debug_check();
        (start_column, start_row)
    }

    /// Delete one character (possibly a line break) next to a position.
    ///
    /// Forward deletion removes the char under the position, or joins the
    /// next line when at the end of a line's content. Backward deletion
    /// removes the char before the position, or joins the current line onto
    /// the previous one when at column 0. At the document's edges nothing
    /// is removed. Returns the caret position after the edit.
    pub fn delete_char(&mut self, forward: bool, column: usize, row: usize) -> (usize, usize) {
        let row = row.min(self.last_row());
        let content_len = self.line_len(row);
        let column = column.min(content_len);

        if forward {
            if column < content_len {
                self.delete_range(column, row, column + 1, row)
            } else if row < self.last_row() {
                self.delete_range(column, row, 0, row + 1)
            } else {
                (content_len, row)
            }
        } else if column > 0 {
            self.delete_range(column - 1, row, column, row)
        } else if row > 0 {
            let previous_len = self.line_len(row - 1);
            self.delete_range(previous_len, row - 1, column, row)
        } else {
            (0, 0)
        }
    }

    /// Get the text a [`delete_range`](Self::delete_range) with the same
    /// arguments would remove.
    #[must_use]
    pub fn text_range(
        &self,
        start_column: usize,
        start_row: usize,
        end_column: usize,
        end_row: usize,
    ) -> String {
        let ((start_column, start_row), (end_column, end_row)) =
            self.clamp_range(start_column, start_row, end_column, end_row);
        if (start_row, start_column) >= (end_row, end_column) {
            return String::new();
        }

        let first = &self.lines[start_row];
        if start_row == end_row {
            let from = byte_offset(first, start_column);
            let to = byte_offset(first, end_column);
            return first[from..to].to_owned();
        }

        let mut text = first[byte_offset(first, start_column)..].to_owned();
        for line in &self.lines[start_row + 1..end_row] {
            text.push_str(line);
        }
        let last = &self.lines[end_row];
        text.push_str(&last[..byte_offset(last, end_column)]);
        text
    }

    fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    fn clamp_range(
        &self,
        start_column: usize,
        start_row: usize,
        end_column: usize,
        end_row: usize,
    ) -> ((usize, usize), (usize, usize)) {
        let start_row = start_row.min(self.last_row());
        let start_column = start_column.min(self.line_len(start_row));
        let end_row = end_row.min(self.last_row());
        let end_column = end_column.min(self.line_len(end_row));
        ((start_column, start_row), (end_column, end_row))
    }

    fn debug_check(&self) {
        debug_assert!(self.invariants_hold(), "line storage invariant violated");
    }

    fn invariants_hold(&self) -> bool {
        let Some((last, rest)) = self.lines.split_last() else {
            return false;
        };
        !last.contains('\n')
            && rest.iter().all(|line| {
                line.strip_suffix('\n')
                    .is_some_and(|content| !content.contains('\n'))
            })
    }
}

impl DocumentBounds for TextBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_len(&self, row: usize) -> usize {
        Self::line_len(self, row)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::with_text(text)
    }
}

/// Byte offset of a char column, saturating at the end of the string.
fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(offset, _)| offset)
}

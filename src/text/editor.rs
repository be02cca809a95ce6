//! Headless editor controller.
//!
//! [`Editor`] owns a document and its selection and turns key presses, text
//! input and pointer clicks into buffer edits and caret motion. Edits always
//! go to the [`TextBuffer`] first; the position it returns is then handed to
//! the [`SelectionEngine`] to relocate the caret.
//!
//! Drawing is left to the host. It reads [`Editor::visible_lines`],
//! [`Editor::caret_rect`] and [`Editor::selection_rects`] after each event
//! and calls [`Editor::blink`] from its own timer every
//! [`EditorOptions::blink_interval`].
//!
//! # Examples
//!
//! ```
//! use canvas_text_core::input::{KeyCode, KeyEvent};
//! use canvas_text_core::{Editor, Position};
//!
//! let mut editor = Editor::with_text("Hello");
//! editor.handle_key(KeyEvent::key(KeyCode::Right));
//! editor.handle_input("ey, h");
//! assert_eq!(editor.text(), "Hey, hello");
//!
//! editor.handle_key(KeyEvent::with_shift(KeyCode::Left));
//! assert_eq!(editor.selected_text().as_deref(), Some("h"));
//! editor.handle_key(KeyEvent::key(KeyCode::Backspace));
//! assert_eq!(editor.text(), "Hey, ello");
//! assert_eq!(editor.selection().position(), Position::new(0, 5));
//! ```

use std::time::Duration;

use crate::error::{Error, Result};
use crate::event::{ObserverId, SelectionObserver};
use crate::input::{Direction, EditCommand, KeyEvent};
use crate::text::buffer::TextBuffer;
use crate::text::layout::{FontMetrics, PixelRect, TextLayout};
use crate::text::selection::{Position, SelectionEngine};

/// Default caret blink interval.
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Editor configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditorOptions {
    /// Font metrics used for layout.
    pub metrics: FontMetrics,
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
    /// How often the host should call [`Editor::blink`].
    pub blink_interval: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            metrics: FontMetrics::default(),
            viewport_width: 640.0,
            viewport_height: 480.0,
            blink_interval: DEFAULT_BLINK_INTERVAL,
        }
    }
}

impl EditorOptions {
    /// Set the font metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the viewport size in pixels.
    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the caret blink interval.
    #[must_use]
    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    /// Check metrics and viewport dimensions.
    pub fn validate(&self) -> Result<()> {
        self.metrics.validate()?;
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(self.viewport_width) || !usable(self.viewport_height) {
            return Err(Error::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }
}

/// A line ready to be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleLine<'a> {
    /// Row index in the document.
    pub row: usize,
    /// Y coordinate of the text baseline.
    pub baseline: f32,
    /// Line content without its line break.
    pub text: &'a str,
}

/// Plain-text editor state: document, selection and configuration.
#[derive(Debug)]
pub struct Editor {
    buffer: TextBuffer,
    selection: SelectionEngine,
    options: EditorOptions,
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_text("")
    }
}

impl Editor {
    /// Create an editor over `buffer`, validating `options`.
    pub fn new(buffer: TextBuffer, options: EditorOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            buffer,
            selection: SelectionEngine::new(),
            options,
        })
    }

    /// Create an editor with default options.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::with_text(text),
            selection: SelectionEngine::new(),
            options: EditorOptions::default(),
        }
    }

    /// The document.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The selection and caret.
    #[must_use]
    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    /// The editor configuration.
    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Swap in a new document and put the caret at its start.
    ///
    /// Returns the previous document.
    pub fn set_buffer(&mut self, buffer: TextBuffer) -> TextBuffer {
        let previous = std::mem::replace(&mut self.buffer, buffer);
        tracing::debug!(lines = self.buffer.line_count(), "document swapped");
        self.selection.set_position(&self.buffer, 0, 0, false);
        previous
    }

    /// Register a selection observer.
    pub fn add_observer(&mut self, observer: impl SelectionObserver + 'static) -> ObserverId {
        self.selection.add_observer(observer)
    }

    /// Unregister a selection observer.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.selection.remove_observer(id)
    }

    /// Text covered by the selection, or `None` for a bare caret.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        let (anchor, focus) = (self.selection.anchor(), self.selection.focus());
        Some(
            self.buffer
                .text_range(anchor.character, anchor.line, focus.character, focus.line),
        )
    }

    /// Insert text at the caret, replacing the selection if there is one.
    pub fn insert_text_at_cursor(&mut self, text: &str) {
        let caret = self.take_selection().unwrap_or_else(|| self.selection.position());
        let (column, row) = self.buffer.insert_text(text, caret.character, caret.line);
        self.move_caret_to(column, row);
    }

    /// Delete one char next to the caret, or the selection if there is one.
    pub fn delete_char_at_cursor(&mut self, forward: bool) {
        if self.take_selection().is_some() {
            return;
        }
        let caret = self.selection.position();
        let (column, row) = self
            .buffer
            .delete_char(forward, caret.character, caret.line);
        self.move_caret_to(column, row);
    }

    /// Run an editing command.
    pub fn execute(&mut self, command: EditCommand) {
        match command {
            EditCommand::DeleteBackward => self.delete_char_at_cursor(false),
            EditCommand::DeleteForward => self.delete_char_at_cursor(true),
            EditCommand::InsertNewline => self.insert_text_at_cursor("\n"),
            EditCommand::Move(direction, extend) => {
                let doc = &self.buffer;
                let selection = &mut self.selection;
                match direction {
                    Direction::Up => selection.move_up(doc, 1, extend),
                    Direction::Down => selection.move_down(doc, 1, extend),
                    Direction::Left => selection.move_left(doc, 1, extend),
                    Direction::Right => selection.move_right(doc, 1, extend),
                };
            }
        }
    }

    /// Handle a key press. Returns whether the key was consumed.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match event.command() {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Handle text typed or pasted into the host's input element.
    pub fn handle_input(&mut self, text: &str) {
        if !text.is_empty() {
            self.insert_text_at_cursor(text);
        }
    }

    /// Move the caret to the glyph boundary under a pointer position.
    pub fn click(&mut self, x: f32, y: f32, extend: bool) {
        let target = TextLayout::new(&self.options.metrics).hit_test(&self.buffer, x, y);
        self.selection.set_position(
            &self.buffer,
            signed(target.character),
            signed(target.line),
            extend,
        );
    }

    /// The editor gained input focus: show the caret.
    pub fn focus(&mut self) {
        self.selection.set_visible(true);
    }

    /// The editor lost input focus: hide the caret.
    pub fn blur(&mut self) {
        self.selection.set_visible(false);
    }

    /// Advance the caret blink phase.
    pub fn blink(&mut self) {
        self.selection.blink();
    }

    /// Lines that fit in the viewport, with their baselines.
    pub fn visible_lines(&self) -> impl Iterator<Item = VisibleLine<'_>> {
        let layout = TextLayout::new(&self.options.metrics);
        let rows = layout.visible_rows(self.options.viewport_height, self.buffer.line_count());
        (0..rows).filter_map(move |row| {
            Some(VisibleLine {
                row,
                baseline: layout.line_baseline(row),
                text: self.buffer.line_content(row)?,
            })
        })
    }

    /// Caret rectangle, or `None` while the caret is hidden or blinked off.
    #[must_use]
    pub fn caret_rect(&self) -> Option<PixelRect> {
        if !self.selection.is_caret_lit() {
            return None;
        }
        let layout = TextLayout::new(&self.options.metrics);
        Some(layout.caret_rect(&self.buffer, self.selection.position()))
    }

    /// Selection highlight rectangles, one per selected line.
    #[must_use]
    pub fn selection_rects(&self) -> Vec<PixelRect> {
        let layout = TextLayout::new(&self.options.metrics);
        layout.selection_rects(
            &self.buffer,
            &self.selection.line_ranges(),
            self.options.viewport_width,
        )
    }

    /// Delete the selected text, if any, returning where it started.
    fn take_selection(&mut self) -> Option<Position> {
        if self.selection.is_empty() {
            return None;
        }
        let (anchor, focus) = (self.selection.anchor(), self.selection.focus());
        let (column, row) =
            self.buffer
                .delete_range(anchor.character, anchor.line, focus.character, focus.line);
        self.move_caret_to(column, row);
        Some(Position::new(row, column))
    }

    fn move_caret_to(&mut self, column: usize, row: usize) {
        self.selection
            .set_position(&self.buffer, signed(column), signed(row), false);
    }
}

fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

//! Cursor and selection state machine.
//!
//! A [`SelectionEngine`] tracks two endpoints, `anchor` and `focus`, kept in
//! document order (`anchor <= focus`), plus the side that further motion
//! moves. A collapsed selection (`anchor == focus`) is a plain caret.
//!
//! All updates go through [`SelectionEngine::set_position`], which
//!
//! 1. forces the target inside the document, wrapping horizontal motion that
//!    is pushed past a line edge onto the neighbouring line,
//! 2. either collapses both endpoints onto the target or extends the
//!    selection from its active side, swapping endpoints if they cross,
//! 3. notifies registered observers.
//!
//! The engine never holds on to a document. Every call that needs bounds
//! receives a [`DocumentBounds`], usually the editor's [`TextBuffer`].
//!
//! [`TextBuffer`]: super::TextBuffer

use std::collections::BTreeMap;
use std::fmt;

use crate::event::{ObserverId, SelectionChange, SelectionObserver};
use crate::text::buffer::DocumentBounds;

/// A `(line, character)` coordinate into a document.
///
/// Positions order lexicographically: first by line, then by character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Line index (0-based).
    pub line: usize,
    /// Column in chars within the line's content (0-based).
    pub character: usize,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// Which endpoint of the selection further motion moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveSide {
    /// The anchor (selection start) is the caret.
    Start,
    /// The focus (selection end) is the caret.
    #[default]
    End,
}

impl ActiveSide {
    fn flipped(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// End of a highlighted range on one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeEnd {
    /// Exclusive end column.
    Column(usize),
    /// The rest of the line, including its line break.
    EndOfLine,
}

/// Highlighted columns on a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    /// First selected column.
    pub start: usize,
    /// Where the selection stops on this line.
    pub end: RangeEnd,
}

/// Selection state: anchor, focus, active side and caret visibility.
///
/// # Examples
///
/// ```
/// use canvas_text_core::{Position, SelectionEngine, TextBuffer};
///
/// let doc = TextBuffer::with_text("Line1\nLine2\nLine3");
/// let mut selection = SelectionEngine::new();
///
/// selection.move_down(&doc, 1, false);
/// selection.move_left(&doc, 1, false);
/// // Moving left from column 0 wraps to the end of the previous line.
/// assert_eq!(selection.position(), Position::new(0, 5));
///
/// selection.move_right(&doc, 1, true);
/// assert_eq!(selection.anchor(), Position::new(0, 5));
/// assert_eq!(selection.focus(), Position::new(1, 0));
/// ```
pub struct SelectionEngine {
    anchor: Position,
    focus: Position,
    active: ActiveSide,
    visible: bool,
    caret_lit: bool,
    observers: Vec<(ObserverId, Box<dyn SelectionObserver>)>,
    next_observer: u64,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("anchor", &self.anchor)
            .field("focus", &self.focus)
            .field("active", &self.active)
            .field("visible", &self.visible)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl SelectionEngine {
    /// Create a collapsed selection at the document start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            anchor: Position::default(),
            focus: Position::default(),
            active: ActiveSide::End,
            visible: false,
            caret_lit: true,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Selection start. Never after [`focus`](Self::focus).
    #[must_use]
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Selection end.
    #[must_use]
    pub fn focus(&self) -> Position {
        self.focus
    }

    /// The endpoint that further motion moves.
    #[must_use]
    pub fn active_side(&self) -> ActiveSide {
        self.active
    }

    /// Caret position: the active endpoint.
    #[must_use]
    pub fn position(&self) -> Position {
        match self.active {
            ActiveSide::Start => self.anchor,
            ActiveSide::End => self.focus,
        }
    }

    /// Check whether the selection is collapsed to a caret.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor == self.focus
    }

    /// Split the selection into per-line column ranges.
    ///
    /// The first line starts at the anchor's column, the last ends at the
    /// focus column, and every line but the last runs to the end of the line
    /// including its break. An empty selection yields an empty map.
    #[must_use]
    pub fn line_ranges(&self) -> BTreeMap<usize, LineRange> {
        let mut ranges = BTreeMap::new();
        if self.is_empty() {
            return ranges;
        }

        let mut start = self.anchor.character;
        for line in self.anchor.line..=self.focus.line {
            let end = if line == self.focus.line {
                RangeEnd::Column(self.focus.character)
            } else {
                RangeEnd::EndOfLine
            };
            ranges.insert(line, LineRange { start, end });
            start = 0;
        }
        ranges
    }

    /// Move the caret, or extend the selection, to a raw target.
    ///
    /// The target may lie outside the document; it is forced into bounds
    /// first. A negative `character`, or one past the line's content, wraps
    /// onto the neighbouring line when `line` is still the caret's current
    /// line. With `extend` false both endpoints collapse onto the target;
    /// otherwise the active endpoint moves and the endpoints are swapped if
    /// they cross.
    pub fn set_position(
        &mut self,
        doc: &(impl DocumentBounds + ?Sized),
        character: isize,
        line: isize,
        extend: bool,
    ) -> SelectionChange {
        let old_anchor = self.anchor;
        let old_focus = self.focus;

        let target = self.force_bounds(doc, character, line);
        self.do_set_position(target, extend);
        self.caret_lit = true;

        tracing::trace!(
            line = target.line,
            character = target.character,
            extend,
            anchor = %self.anchor,
            focus = %self.focus,
            "selection updated"
        );
        self.notify();

        SelectionChange {
            old_anchor,
            old_focus,
            anchor: self.anchor,
            focus: self.focus,
        }
    }

    /// Move up by `length` lines, keeping the column.
    pub fn move_up(
        &mut self,
        doc: &(impl DocumentBounds + ?Sized),
        length: usize,
        extend: bool,
    ) -> SelectionChange {
        let caret = self.position();
        let line = signed(caret.line).saturating_sub(signed(length));
        self.set_position(doc, signed(caret.character), line, extend)
    }

    /// Move down by `length` lines, keeping the column.
    pub fn move_down(
        &mut self,
        doc: &(impl DocumentBounds + ?Sized),
        length: usize,
        extend: bool,
    ) -> SelectionChange {
        let caret = self.position();
        let line = signed(caret.line).saturating_add(signed(length));
        self.set_position(doc, signed(caret.character), line, extend)
    }

    /// Move left by `length` chars, wrapping to the previous line at column 0.
    pub fn move_left(
        &mut self,
        doc: &(impl DocumentBounds + ?Sized),
        length: usize,
        extend: bool,
    ) -> SelectionChange {
        let caret = self.position();
        let character = signed(caret.character).saturating_sub(signed(length));
        self.set_position(doc, character, signed(caret.line), extend)
    }

    /// Move right by `length` chars, wrapping to the next line past its end.
    pub fn move_right(
        &mut self,
        doc: &(impl DocumentBounds + ?Sized),
        length: usize,
        extend: bool,
    ) -> SelectionChange {
        let caret = self.position();
        let character = signed(caret.character).saturating_add(signed(length));
        self.set_position(doc, character, signed(caret.line), extend)
    }

    /// Show or hide the caret. Showing it restarts the blink phase lit.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.caret_lit = true;
    }

    /// Whether the caret is shown at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Advance the blink phase. Called by the host's blink timer.
    pub fn blink(&mut self) {
        if self.visible {
            self.caret_lit = !self.caret_lit;
        }
    }

    /// Whether the caret should be drawn right now.
    #[must_use]
    pub fn is_caret_lit(&self) -> bool {
        self.visible && self.caret_lit
    }

    /// Register an observer called after every position update.
    pub fn add_observer(&mut self, observer: impl SelectionObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Unregister an observer. Returns false if it was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    fn force_bounds(
        &self,
        doc: &(impl DocumentBounds + ?Sized),
        character: isize,
        line: isize,
    ) -> Position {
        let current_line = signed(self.position().line);
        let last_line = signed(doc.line_count().saturating_sub(1));

        let mut line = line.max(0);
        let mut character = character;

        if character < 0 {
            if line == current_line && line > 0 {
                line -= 1;
                character = signed(doc.line_len(unsigned(line)));
            } else {
                character = 0;
            }
        }

        line = line.min(last_line);
        let line_len = signed(doc.line_len(unsigned(line)));
        if character > line_len {
            if line == current_line && line < last_line {
                line += 1;
                character = 0;
            } else {
                character = line_len;
            }
        }

        Position::new(unsigned(line), unsigned(character))
    }

    fn do_set_position(&mut self, target: Position, extend: bool) {
        if !extend {
            self.active = ActiveSide::End;
            self.anchor = target;
            self.focus = target;
            return;
        }

        if target < self.anchor && (self.is_empty() || target.line < self.anchor.line) {
            self.active = ActiveSide::Start;
        }

        match self.active {
            ActiveSide::End => self.focus = target,
            ActiveSide::Start => self.anchor = target,
        }

        if self.anchor > self.focus {
            std::mem::swap(&mut self.anchor, &mut self.focus);
            self.active = self.active.flipped();
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in &mut observers {
            observer.selection_changed(self, self.anchor, self.focus);
        }
        // Observers cannot register new ones through `&self`, so nothing is lost.
        self.observers = observers;
    }
}

fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

fn unsigned(value: isize) -> usize {
    usize::try_from(value).unwrap_or(0)
}

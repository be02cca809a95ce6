//! Text storage, selection and editing.
//!
//! Key types:
//!
//! - [`TextBuffer`]: the document as a list of newline-terminated lines
//! - [`SelectionEngine`]: anchor/focus selection with caret motion
//! - [`Editor`]: routes key, text and pointer input to the two above
//! - [`TextLayout`]: pixel geometry from measured [`FontMetrics`]
//!
//! # Examples
//!
//! ## Editing a buffer directly
//!
//! ```
//! use canvas_text_core::{SelectionEngine, TextBuffer};
//!
//! let mut buffer = TextBuffer::with_text("Line1\n\nLine3\nLine4");
//! let mut selection = SelectionEngine::new();
//!
//! let (column, row) = buffer.insert_text("a\n\nb", 1, 0);
//! selection.set_position(&buffer, column as isize, row as isize, false);
//! assert_eq!(buffer.line(0), Some("La\n"));
//! assert_eq!(selection.position().line, 2);
//! ```
//!
//! ## Highlighted ranges
//!
//! ```
//! use canvas_text_core::{RangeEnd, SelectionEngine, TextBuffer};
//!
//! let doc = TextBuffer::with_text("Line1\nLine2\nLine3");
//! let mut selection = SelectionEngine::new();
//! selection.move_right(&doc, 1, false);
//! selection.move_right(&doc, 2, true);
//! selection.move_down(&doc, 1, true);
//!
//! let ranges = selection.line_ranges();
//! assert_eq!(ranges[&0].end, RangeEnd::EndOfLine);
//! assert_eq!(ranges[&1].end, RangeEnd::Column(3));
//! ```

mod buffer;
mod editor;
mod layout;
mod selection;

pub use buffer::{DocumentBounds, TextBuffer, prepare_text};
pub use editor::{DEFAULT_BLINK_INTERVAL, Editor, EditorOptions, VisibleLine};
pub use layout::{FontMetrics, PixelRect, TextLayout, cell_width};
pub use selection::{ActiveSide, LineRange, Position, RangeEnd, SelectionEngine};

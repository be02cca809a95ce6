//! `canvas_text_core` - plain-text editing core for canvas-drawn editors
//!
//! A line-oriented text buffer, an anchor/focus selection engine with
//! wrap-around caret motion, and the headless glue an editor widget needs:
//! key routing, caret blink state and pixel layout of lines, caret and
//! selection highlight.

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional pixel math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow TextBuffer in text etc
#![allow(clippy::missing_errors_doc)] // Errors are documented on the enum
#![allow(clippy::missing_panics_doc)] // Panics only on broken internal invariants
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::float_cmp)] // Exact pixel values in tests

pub mod error;
pub mod event;
pub mod input;
pub mod text;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{ObserverId, SelectionChange, SelectionObserver};
pub use input::{KeyCode, KeyEvent, KeyModifiers};
pub use text::{
    Editor, EditorOptions, FontMetrics, LineRange, Position, RangeEnd, SelectionEngine,
    TextBuffer,
};

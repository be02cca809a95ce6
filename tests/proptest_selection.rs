//! Property-based tests for the selection engine.
//!
//! Random motion and position sequences must keep the selection ordered and
//! inside the document.

use canvas_text_core::text::DocumentBounds;
use canvas_text_core::{Position, RangeEnd, SelectionEngine, TextBuffer};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Up(usize, bool),
    Down(usize, bool),
    Left(usize, bool),
    Right(usize, bool),
    Set(isize, isize, bool),
}

/// Mostly short steps, occasionally a length that would overflow the target.
fn length(max: usize) -> impl Strategy<Value = usize> {
    prop_oneof![
        8 => 0..max,
        1 => Just(usize::MAX),
        1 => (usize::MAX / 2)..=usize::MAX,
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (length(4), any::<bool>()).prop_map(|(n, e)| Op::Up(n, e)),
        (length(4), any::<bool>()).prop_map(|(n, e)| Op::Down(n, e)),
        (length(8), any::<bool>()).prop_map(|(n, e)| Op::Left(n, e)),
        (length(8), any::<bool>()).prop_map(|(n, e)| Op::Right(n, e)),
        (-10isize..30, -3isize..10, any::<bool>()).prop_map(|(c, l, e)| Op::Set(c, l, e)),
    ]
}

fn document() -> impl Strategy<Value = TextBuffer> {
    "[ab\n]{0,30}".prop_map(|text| TextBuffer::with_text(&text))
}

fn apply(selection: &mut SelectionEngine, doc: &TextBuffer, op: &Op) {
    match *op {
        Op::Up(n, extend) => selection.move_up(doc, n, extend),
        Op::Down(n, extend) => selection.move_down(doc, n, extend),
        Op::Left(n, extend) => selection.move_left(doc, n, extend),
        Op::Right(n, extend) => selection.move_right(doc, n, extend),
        Op::Set(character, line, extend) => selection.set_position(doc, character, line, extend),
    };
}

fn in_bounds(doc: &TextBuffer, position: Position) -> bool {
    position.line < doc.line_count() && position.character <= DocumentBounds::line_len(doc, position.line)
}

proptest! {
    /// The anchor never comes after the focus.
    #[test]
    fn anchor_never_after_focus(doc in document(), ops in prop::collection::vec(op(), 0..40)) {
        let mut selection = SelectionEngine::new();
        for op in &ops {
            apply(&mut selection, &doc, op);
            prop_assert!(
                selection.anchor() <= selection.focus(),
                "after {:?}: {:?} > {:?}", op, selection.anchor(), selection.focus()
            );
        }
    }

    /// Every endpoint stays inside the document.
    #[test]
    fn endpoints_stay_in_bounds(doc in document(), ops in prop::collection::vec(op(), 0..40)) {
        let mut selection = SelectionEngine::new();
        for op in &ops {
            apply(&mut selection, &doc, op);
            prop_assert!(in_bounds(&doc, selection.anchor()), "anchor out of bounds after {:?}", op);
            prop_assert!(in_bounds(&doc, selection.focus()), "focus out of bounds after {:?}", op);
        }
    }

    /// The caret is always one of the two endpoints.
    #[test]
    fn caret_is_an_endpoint(doc in document(), ops in prop::collection::vec(op(), 0..40)) {
        let mut selection = SelectionEngine::new();
        for op in &ops {
            apply(&mut selection, &doc, op);
            let caret = selection.position();
            prop_assert!(caret == selection.anchor() || caret == selection.focus());
        }
    }

    /// Line ranges cover exactly the lines between anchor and focus.
    #[test]
    fn line_ranges_span_selection(doc in document(), ops in prop::collection::vec(op(), 0..40)) {
        let mut selection = SelectionEngine::new();
        for op in &ops {
            apply(&mut selection, &doc, op);
        }

        let ranges = selection.line_ranges();
        if selection.is_empty() {
            prop_assert!(ranges.is_empty());
        } else {
            let (anchor, focus) = (selection.anchor(), selection.focus());
            let lines: Vec<usize> = ranges.keys().copied().collect();
            prop_assert_eq!(lines, (anchor.line..=focus.line).collect::<Vec<_>>());
            prop_assert_eq!(ranges[&anchor.line].start, anchor.character);
            prop_assert_eq!(ranges[&focus.line].end, RangeEnd::Column(focus.character));
            for line in anchor.line..focus.line {
                prop_assert_eq!(ranges[&line].end, RangeEnd::EndOfLine);
            }
        }
    }

    /// A collapsing move always leaves an empty selection.
    #[test]
    fn collapsing_move_empties_selection(doc in document(), ops in prop::collection::vec(op(), 0..20)) {
        let mut selection = SelectionEngine::new();
        for op in &ops {
            apply(&mut selection, &doc, op);
        }
        selection.move_right(&doc, 0, false);
        prop_assert!(selection.is_empty());
    }
}

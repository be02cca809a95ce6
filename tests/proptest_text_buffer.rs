//! Property-based tests for the line buffer.
//!
//! Uses proptest to verify invariants that must hold across all edits.

use canvas_text_core::TextBuffer;
use canvas_text_core::text::prepare_text;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Short ASCII text with plenty of line breaks.
fn line_text() -> impl Strategy<Value = String> {
    "[a-c\n]{0,40}"
}

/// Text mixing multi-byte chars and line breaks.
fn unicode_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["a", "é", "日", "😀", "\n", " ", "\n\n"]),
        0..25,
    )
    .prop_map(|parts| parts.concat())
}

fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![line_text(), unicode_text()]
}

fn assert_well_formed(buffer: &TextBuffer) -> Result<(), TestCaseError> {
    let lines: Vec<&str> = buffer.lines().collect();
    prop_assert!(!lines.is_empty(), "buffer must keep at least one line");
    let (last, rest) = lines.split_last().unwrap();
    prop_assert!(!last.contains('\n'), "last line must not hold a break: {:?}", last);
    for line in rest {
        prop_assert!(line.ends_with('\n'), "line {:?} lost its break", line);
        prop_assert_eq!(line.matches('\n').count(), 1);
    }
    Ok(())
}

// ============================================================================
// Splitting
// ============================================================================

proptest! {
    /// Joining the split lines reproduces the text.
    #[test]
    fn prepare_text_round_trips(text in any_text()) {
        let lines = prepare_text(&text);
        prop_assert_eq!(lines.concat(), text.clone());
        prop_assert_eq!(lines.len(), text.matches('\n').count() + 1);
    }

    /// Every fragment but the last ends in exactly one line break.
    #[test]
    fn prepare_text_keeps_terminators(text in any_text()) {
        let buffer = TextBuffer::with_text(&text);
        assert_well_formed(&buffer)?;
        prop_assert_eq!(buffer.to_string(), text);
    }
}

// ============================================================================
// Insertion
// ============================================================================

proptest! {
    /// Inserting grows the document by exactly the inserted length.
    #[test]
    fn insert_adds_length(
        text in any_text(),
        inserted in any_text(),
        column in 0usize..20,
        row in 0usize..12,
    ) {
        let mut buffer = TextBuffer::with_text(&text);
        let before = buffer.len();
        buffer.insert_text(&inserted, column, row);
        prop_assert_eq!(buffer.len(), before + inserted.chars().count());
        assert_well_formed(&buffer)?;
    }

    /// The returned caret sits right after the inserted text.
    #[test]
    fn insert_caret_follows_text(
        text in any_text(),
        inserted in any_text(),
        column in 0usize..20,
        row in 0usize..12,
    ) {
        let mut buffer = TextBuffer::with_text(&text);
        let start_row = row.min(buffer.line_count() - 1);
        let start_column = column.min(buffer.line_len(start_row));

        let (end_column, end_row) = buffer.insert_text(&inserted, column, row);
        prop_assert_eq!(
            buffer.text_range(start_column, start_row, end_column, end_row),
            inserted
        );
    }
}

// ============================================================================
// Deletion
// ============================================================================

proptest! {
    /// Re-inserting deleted text at the returned position restores the
    /// original document.
    #[test]
    fn delete_then_reinsert_restores(
        text in any_text(),
        start_column in 0usize..20,
        start_row in 0usize..12,
        end_column in 0usize..20,
        end_row in 0usize..12,
    ) {
        let mut buffer = TextBuffer::with_text(&text);
        let removed = buffer.text_range(start_column, start_row, end_column, end_row);
        let before = buffer.len();

        let (column, row) = buffer.delete_range(start_column, start_row, end_column, end_row);
        prop_assert_eq!(buffer.len(), before - removed.chars().count());
        assert_well_formed(&buffer)?;

        buffer.insert_text(&removed, column, row);
        prop_assert_eq!(buffer.to_string(), text);
    }

    /// Single-char deletes remove at most one char and keep lines well formed.
    #[test]
    fn delete_char_removes_at_most_one(
        text in any_text(),
        forward in any::<bool>(),
        column in 0usize..20,
        row in 0usize..12,
    ) {
        let mut buffer = TextBuffer::with_text(&text);
        let before = buffer.len();
        let (column, row) = buffer.delete_char(forward, column, row);
        prop_assert!(before - buffer.len() <= 1);
        prop_assert!(row < buffer.line_count());
        prop_assert!(column <= buffer.line_len(row));
        assert_well_formed(&buffer)?;
    }

    /// Deleting at the document's edges never changes it.
    #[test]
    fn edge_deletes_are_noops(text in any_text()) {
        let mut buffer = TextBuffer::with_text(&text);
        prop_assert_eq!(buffer.delete_char(false, 0, 0), (0, 0));

        let last_row = buffer.line_count() - 1;
        let last_column = buffer.line_len(last_row);
        prop_assert_eq!(buffer.delete_char(true, last_column, last_row), (last_column, last_row));
        prop_assert_eq!(buffer.to_string(), text);
    }
}

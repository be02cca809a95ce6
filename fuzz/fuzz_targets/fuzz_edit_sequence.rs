//! Fuzz target for interleaved edits and caret motion.
//!
//! Applies arbitrary edit and motion sequences to a buffer and selection and
//! checks that neither panics and the selection stays ordered and in bounds.

#![no_main]

use arbitrary::Arbitrary;
use canvas_text_core::{SelectionEngine, TextBuffer};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(String),
    DeleteChar(bool),
    DeleteRange(u8, u8, u8, u8),
    Move(u8, u8, bool),
    Set(i16, i16, bool),
}

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut buffer = TextBuffer::with_text(&input.text);
    let mut selection = SelectionEngine::new();

    for op in input.ops.iter().take(256) {
        let caret = selection.position();
        match op {
            Op::Insert(text) => {
                let (column, row) = buffer.insert_text(text, caret.character, caret.line);
                selection.set_position(&buffer, column as isize, row as isize, false);
            }
            Op::DeleteChar(forward) => {
                let (column, row) = buffer.delete_char(*forward, caret.character, caret.line);
                selection.set_position(&buffer, column as isize, row as isize, false);
            }
            Op::DeleteRange(sc, sr, ec, er) => {
                let (column, row) =
                    buffer.delete_range(*sc as usize, *sr as usize, *ec as usize, *er as usize);
                selection.set_position(&buffer, column as isize, row as isize, false);
            }
            Op::Move(direction, length, extend) => {
                let length = usize::from(*length % 8);
                match direction % 4 {
                    0 => selection.move_up(&buffer, length, *extend),
                    1 => selection.move_down(&buffer, length, *extend),
                    2 => selection.move_left(&buffer, length, *extend),
                    _ => selection.move_right(&buffer, length, *extend),
                };
            }
            Op::Set(character, line, extend) => {
                selection.set_position(&buffer, *character as isize, *line as isize, *extend);
            }
        }

        assert!(selection.anchor() <= selection.focus());
        let caret = selection.position();
        assert!(caret.line < buffer.line_count());
        assert!(caret.character <= buffer.line_len(caret.line));
    }
});

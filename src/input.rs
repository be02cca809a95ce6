//! Keyboard events and the editing commands they map to.
//!
//! Hosts translate their native key events into [`KeyEvent`]s. Printable
//! text does not go through here: it arrives through the host's text input
//! channel and is passed to [`Editor::handle_input`](crate::Editor::handle_input).

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
        /// Super/Meta/Command key.
        const SUPER = 0b0000_1000;
    }
}

/// A key code representing a keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Enter/Return key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// A character key (includes space).
    Char(char),
}

/// Keyboard event with modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a Shift+key event.
    #[must_use]
    pub fn with_shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Check if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// The editing command bound to this key, if any.
    ///
    /// Arrows move the caret by one step and extend the selection while
    /// Shift is held. Backspace, Delete and Enter edit at the caret.
    #[must_use]
    pub fn command(&self) -> Option<EditCommand> {
        let extend = self.shift();
        let command = match self.code {
            KeyCode::Backspace => EditCommand::DeleteBackward,
            KeyCode::Delete => EditCommand::DeleteForward,
            KeyCode::Enter => EditCommand::InsertNewline,
            KeyCode::Left => EditCommand::Move(Direction::Left, extend),
            KeyCode::Right => EditCommand::Move(Direction::Right, extend),
            KeyCode::Up => EditCommand::Move(Direction::Up, extend),
            KeyCode::Down => EditCommand::Move(Direction::Down, extend),
            KeyCode::Tab | KeyCode::Esc | KeyCode::Char(_) => return None,
        };
        Some(command)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}

/// Direction of a caret motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// An editing action the editor can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditCommand {
    /// Delete the char (or line break) before the caret.
    DeleteBackward,
    /// Delete the char (or line break) after the caret.
    DeleteForward,
    /// Split the line at the caret.
    InsertNewline,
    /// Move the caret one step; `true` extends the selection.
    Move(Direction, bool),
}

//! Selection change notifications.
//!
//! Instead of a single ambient callback slot, observers are registered on
//! the [`SelectionEngine`](crate::text::SelectionEngine) they watch and are
//! called after every position update. Every update also returns a
//! [`SelectionChange`] value, so callers that only need the diff can skip
//! observers entirely.

use crate::text::{Position, SelectionEngine};

/// Receives selection updates.
///
/// Implemented for any `FnMut(&SelectionEngine, Position, Position)`
/// closure, which receives the engine followed by its anchor and focus.
pub trait SelectionObserver {
    /// Called after the engine's endpoints have been updated.
    fn selection_changed(&mut self, selection: &SelectionEngine, anchor: Position, focus: Position);
}

impl<F> SelectionObserver for F
where
    F: FnMut(&SelectionEngine, Position, Position),
{
    fn selection_changed(&mut self, selection: &SelectionEngine, anchor: Position, focus: Position) {
        self(selection, anchor, focus);
    }
}

/// Handle returned by observer registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// Endpoints of a selection before and after one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionChange {
    /// Anchor before the update.
    pub old_anchor: Position,
    /// Focus before the update.
    pub old_focus: Position,
    /// Anchor after the update.
    pub anchor: Position,
    /// Focus after the update.
    pub focus: Position,
}

impl SelectionChange {
    /// Check whether either endpoint moved.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.old_anchor != self.anchor || self.old_focus != self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_detection() {
        let origin = Position::new(0, 0);
        let moved = Position::new(0, 3);
        let unchanged = SelectionChange {
            old_anchor: origin,
            old_focus: origin,
            anchor: origin,
            focus: origin,
        };
        assert!(!unchanged.is_changed());

        let extended = SelectionChange {
            focus: moved,
            ..unchanged
        };
        assert!(extended.is_changed());
    }
}

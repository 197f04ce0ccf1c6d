#![forbid(unsafe_code)]

//! Cursor state: the single focused byte.
//!
//! All operations take the buffer length and clamp into `[0, len - 1]`.
//! With an empty buffer there is nothing to focus and every operation leaves
//! the cursor cleared.

use crate::event::Pane;

/// The focused byte, if any, and the column it was placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    /// Focused byte index.
    pub index: Option<usize>,
    /// Column the cursor was placed in.
    pub pane: Pane,
}

impl CursorState {
    /// A cursor at `index` in the hex column.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self {
            index: Some(index),
            pane: Pane::Hex,
        }
    }

    /// Whether a byte is focused.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.index.is_some()
    }

    /// Focus `index`, clamped to the buffer.
    pub fn set(&mut self, index: usize, len: usize) {
        self.index = len.checked_sub(1).map(|last| index.min(last));
    }

    /// Focus `index` in a specific column.
    pub fn set_in(&mut self, index: usize, pane: Pane, len: usize) {
        self.set(index, len);
        self.pane = pane;
    }

    /// Move by `delta` bytes, clamped. Does nothing without a cursor.
    pub fn move_by(&mut self, delta: i64, len: usize) {
        let Some(current) = self.index else {
            return;
        };
        let Some(last) = len.checked_sub(1) else {
            self.index = None;
            return;
        };
        let target = (current as i64).saturating_add(delta);
        self.index = Some(crate::geometry::clamp_index(target, last));
    }

    /// Drop focus.
    pub fn clear(&mut self) {
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_to_last_byte() {
        let mut c = CursorState::default();
        c.set(42, 10);
        assert_eq!(c.index, Some(9));
        c.set(3, 10);
        assert_eq!(c.index, Some(3));
    }

    #[test]
    fn set_on_empty_buffer_clears() {
        let mut c = CursorState::at(3);
        c.set(0, 0);
        assert_eq!(c.index, None);
    }

    #[test]
    fn move_clamps_both_ends() {
        let mut c = CursorState::at(2);
        c.move_by(-5, 10);
        assert_eq!(c.index, Some(0));
        c.move_by(100, 10);
        assert_eq!(c.index, Some(9));
        c.move_by(-1, 10);
        assert_eq!(c.index, Some(8));
    }

    #[test]
    fn move_without_cursor_is_noop() {
        let mut c = CursorState::default();
        c.move_by(1, 10);
        assert!(!c.is_active());
    }

    #[test]
    fn set_in_records_pane() {
        let mut c = CursorState::default();
        c.set_in(4, Pane::Text, 8);
        assert_eq!(c, CursorState { index: Some(4), pane: Pane::Text });
        c.clear();
        assert_eq!(c.index, None);
        assert_eq!(c.pane, Pane::Text);
    }
}

#![forbid(unsafe_code)]
//! Selection model for drag and keyboard range selection.
//!
//! This is a pure data/logic layer:
//! - no I/O
//! - deterministic output given the same call sequence
//!
//! A drag starts at an *origin* byte. Every extension point moves one end of
//! the range while the origin stays fixed, so dragging back across the origin
//! re-anchors the range on the other side instead of inverting it.
//!
//! # Invariants
//!
//! - `start <= end` for every stored range.
//! - `origin` is always `start` or `end`.
//! - Extending without an active drag changes nothing.

/// Inclusive byte range with the anchor it grew from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectRange {
    pub start: usize,
    pub end: usize,
    pub origin: usize,
}

impl SelectRange {
    /// Range between two indices in any order, anchored at `origin`.
    #[must_use]
    pub fn new(origin: usize, other: usize) -> Self {
        Self {
            start: origin.min(other),
            end: origin.max(other),
            origin,
        }
    }

    /// One-byte range.
    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
            origin: index,
        }
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// The end opposite the origin: where a drag or keyboard extension
    /// last moved to.
    #[must_use]
    pub const fn head(&self) -> usize {
        if self.origin == self.start {
            self.end
        } else {
            self.start
        }
    }

    /// Number of bytes covered.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether the range collapsed to one byte.
    #[inline]
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Clip both ends into `[0, last]`, keeping the origin on an end.
    #[must_use]
    pub fn clamped(self, last: usize) -> Self {
        let start = self.start.min(last);
        let end = self.end.min(last);
        let origin = if self.origin == self.end { end } else { start };
        Self { start, end, origin }
    }
}

/// Resolve the range after moving the drag point from `prev` to `next`.
fn reanchor(prev: usize, next: usize, origin: usize) -> (usize, usize) {
    use std::cmp::Ordering::{Equal, Greater, Less};

    match next.cmp(&prev) {
        Equal => (origin.min(prev), origin.max(prev)),
        // Moving forward across the origin: rebuild from the origin.
        Greater if prev < origin && next > origin => (origin, next),
        // Moving forward on the far side: the end grows.
        Greater if prev >= origin => (origin, next),
        // Moving forward below the origin: the start retracts.
        Greater => (next, origin),
        // Moving backward across the origin.
        Less if prev > origin && next < origin => (next, origin),
        // Moving backward above the origin: the end retracts.
        Less if next >= origin => (origin, next),
        // Moving backward below the origin: the start grows.
        Less => (next, origin),
    }
}

/// Committed range plus in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    range: Option<SelectRange>,
    /// Last extension point while a drag is active.
    drag_prev: Option<usize>,
}

impl SelectionState {
    /// Current range, if any.
    #[must_use]
    pub const fn range(&self) -> Option<SelectRange> {
        self.range
    }

    /// `(start, end)` of the current range.
    #[must_use]
    pub fn bounds(&self) -> Option<(usize, usize)> {
        self.range.map(|r| (r.start, r.end))
    }

    /// Moving end of the current range.
    #[must_use]
    pub fn head(&self) -> Option<usize> {
        self.range.map(|r| r.head())
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag_prev.is_some()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range.is_some_and(|r| r.contains(index))
    }

    /// Start a drag at `index`: `origin = start = end = index`.
    pub fn begin(&mut self, index: usize) {
        self.range = Some(SelectRange::single(index));
        self.drag_prev = Some(index);
    }

    /// Move the drag point to `index`. Returns whether the range changed.
    pub fn extend(&mut self, index: usize) -> bool {
        let (Some(prev), Some(range)) = (self.drag_prev, self.range) else {
            return false;
        };
        let (start, end) = reanchor(prev, index, range.origin);
        let next = SelectRange {
            start,
            end,
            origin: range.origin,
        };
        self.drag_prev = Some(index);
        let changed = next != range;
        self.range = Some(next);
        changed
    }

    /// Finish the drag. A drag that never left its origin clears the range.
    pub fn end(&mut self) {
        if self.drag_prev.take().is_none() {
            return;
        }
        if self.range.is_some_and(|r| r.is_single()) {
            self.range = None;
        }
    }

    /// Keyboard extension: grow from the existing anchor (or `from`) to `to`.
    ///
    /// `from` should be [`head`](Self::head) when a range exists.
    pub fn select_towards(&mut self, from: usize, to: usize) {
        let origin = self.range.map_or(from, |r| r.origin);
        let (start, end) = reanchor(from, to, origin);
        self.drag_prev = None;
        self.range = (start != end).then_some(SelectRange { start, end, origin });
    }

    /// Replace the range; unordered bounds are normalized.
    pub fn set_range(&mut self, a: usize, b: usize) {
        self.range = Some(SelectRange::new(a, b));
        self.drag_prev = None;
    }

    /// Clip the range to a buffer of `len` bytes, dropping it when empty.
    pub fn clamp_to(&mut self, len: usize) {
        self.range = match (self.range, len.checked_sub(1)) {
            (Some(r), Some(last)) => Some(r.clamped(last)),
            _ => None,
        };
    }

    /// Drop the range and any drag in progress.
    pub fn clear(&mut self) {
        self.range = None;
        self.drag_prev = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(s: &SelectionState) -> (usize, usize, usize) {
        let r = s.range().unwrap();
        (r.start, r.end, r.origin)
    }

    #[test]
    fn begin_sets_all_three() {
        let mut s = SelectionState::default();
        s.begin(5);
        assert_eq!(bounds(&s), (5, 5, 5));
        assert!(s.is_dragging());
    }

    #[test]
    fn drag_backwards_from_origin() {
        let mut s = SelectionState::default();
        s.begin(5);
        s.extend(2);
        assert_eq!(bounds(&s), (2, 5, 5));
    }

    #[test]
    fn crossing_the_origin_reanchors() {
        let mut s = SelectionState::default();
        s.begin(5);
        s.extend(8);
        assert_eq!(bounds(&s), (5, 8, 5));
        s.extend(3);
        assert_eq!(bounds(&s), (3, 5, 5));
        s.extend(9);
        assert_eq!(bounds(&s), (5, 9, 5));
    }

    #[test]
    fn retracting_towards_the_origin() {
        let mut s = SelectionState::default();
        s.begin(10);
        s.extend(20);
        s.extend(12);
        assert_eq!(bounds(&s), (10, 12, 10));
        s.extend(4);
        s.extend(8);
        assert_eq!(bounds(&s), (8, 10, 10));
    }

    #[test]
    fn extend_without_drag_is_noop() {
        let mut s = SelectionState::default();
        assert!(!s.extend(4));
        assert!(s.range().is_none());

        s.set_range(1, 3);
        assert!(!s.extend(9));
        assert_eq!(s.bounds(), Some((1, 3)));
    }

    #[test]
    fn click_without_drag_clears() {
        let mut s = SelectionState::default();
        s.begin(4);
        s.end();
        assert!(s.range().is_none());
        assert!(!s.is_dragging());
    }

    #[test]
    fn end_keeps_real_ranges() {
        let mut s = SelectionState::default();
        s.begin(4);
        s.extend(6);
        s.end();
        assert_eq!(s.bounds(), Some((4, 6)));
        // A second end with no drag changes nothing.
        s.end();
        assert_eq!(s.bounds(), Some((4, 6)));
    }

    #[test]
    fn set_range_normalizes() {
        let mut s = SelectionState::default();
        s.set_range(9, 2);
        assert_eq!(bounds(&s), (2, 9, 9));
    }

    #[test]
    fn keyboard_growth_keeps_anchor() {
        let mut s = SelectionState::default();
        s.select_towards(5, 6);
        assert_eq!(bounds(&s), (5, 6, 5));
        s.select_towards(6, 7);
        assert_eq!(bounds(&s), (5, 7, 5));
        s.select_towards(7, 3);
        assert_eq!(bounds(&s), (3, 5, 5));
        s.select_towards(3, 5);
        assert!(s.range().is_none());
    }

    #[test]
    fn head_is_the_moving_end() {
        let mut s = SelectionState::default();
        s.begin(5);
        s.extend(8);
        s.end();
        assert_eq!(s.head(), Some(8));
        s.select_towards(8, 9);
        assert_eq!(bounds(&s), (5, 9, 5));
        s.set_range(9, 2);
        assert_eq!(s.head(), Some(2));
    }

    #[test]
    fn clamp_to_shorter_buffer() {
        let mut s = SelectionState::default();
        s.set_range(2, 50);
        s.clamp_to(10);
        assert_eq!(bounds(&s), (2, 9, 2));
        s.clamp_to(0);
        assert!(s.range().is_none());
    }
}

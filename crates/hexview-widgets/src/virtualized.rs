#![forbid(unsafe_code)]

//! Virtualized scrolling over the byte grid.
//!
//! The buffer is `ceil(len / columns)` rows tall but only `rows` fit in the
//! container. [`ScrollState`] tracks which row is on top and hands renderers
//! a [`RenderWindow`]: the visible rows plus `overscan_count` rows on each
//! side, so fast scrolling never shows blank rows.
//!
//! # Invariants
//!
//! - `row_index <= max_row_index` after every operation.
//! - `index == row_index * columns` (first visible byte).
//! - Out-of-range requests clamp; nothing here returns an error.
//!
//! # Placement
//!
//! | Placement       | Target row ends up                                  |
//! |-----------------|-----------------------------------------------------|
//! | `Top`           | first visible row                                   |
//! | `Bottom`        | last visible row                                    |
//! | `Middle`        | centre                                              |
//! | `Include`       | unchanged if visible, else nearest edge             |
//! | `IncludeMiddle` | unchanged if visible, else centre                   |
//! | `Smart`         | unchanged if visible, nearest edge if within one page, else centre |
//!
//! # Touch
//!
//! [`TouchTracker`] pages by whole rows while the finger keeps moving in one
//! direction. Once either axis reverses the gesture is *stale*: the tracker
//! stops paging and reports [`TouchOutcome::Native`] so the host's own
//! overflow scrolling takes over until the next touch starts.

use std::ops::Range;

/// Default rows per wheel notch.
pub const DEFAULT_SPEED: usize = 3;
/// Default overscan rows on each side of the viewport.
pub const DEFAULT_OVERSCAN: usize = 30;

/// Where a scrolled-to row should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    Top,
    Middle,
    Bottom,
    Include,
    IncludeMiddle,
    #[default]
    Smart,
}

/// Rows to materialize for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderWindow {
    /// Rows inside the viewport.
    pub visible: Range<usize>,
    /// Visible rows widened by the overscan on both sides.
    pub rows: Range<usize>,
    /// Bytes per row.
    pub columns: usize,
}

impl RenderWindow {
    /// Byte range covered by the overscan rows, clipped to `len`.
    #[must_use]
    pub fn byte_range(&self, len: usize) -> Range<usize> {
        let start = (self.rows.start * self.columns).min(len);
        let end = (self.rows.end * self.columns).min(len);
        start..end
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What a touch move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// No gesture in progress.
    Ignored,
    /// Paged by this many rows (may be zero).
    Paged(i64),
    /// Gesture is stale; the host should scroll natively.
    Native,
}

/// Direction tracking for one touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchTracker {
    origin: Option<(i32, i32)>,
    last: (i32, i32),
    direction: (i32, i32),
    stale: bool,
    paged: i64,
}

impl TouchTracker {
    pub fn start(&mut self, x: i32, y: i32) {
        *self = Self {
            origin: Some((x, y)),
            last: (x, y),
            ..Self::default()
        };
    }

    /// Track a move; returns how many rows to page by.
    pub fn track(&mut self, x: i32, y: i32, row_height: u32) -> TouchOutcome {
        let Some((_, origin_y)) = self.origin else {
            return TouchOutcome::Ignored;
        };
        let step = ((x - self.last.0).signum(), (y - self.last.1).signum());
        let flipped = |prev: i32, now: i32| prev != 0 && now != 0 && prev != now;
        if !self.stale && (flipped(self.direction.0, step.0) || flipped(self.direction.1, step.1)) {
            hexview_core::debug!(x, y, "touch reversed; handing off to native scrolling");
            self.stale = true;
        }
        if step.0 != 0 {
            self.direction.0 = step.0;
        }
        if step.1 != 0 {
            self.direction.1 = step.1;
        }
        self.last = (x, y);

        if self.stale || row_height == 0 {
            return TouchOutcome::Native;
        }
        // Dragging up moves content up, i.e. scrolls towards the end.
        let dragged = i64::from(origin_y - y) / i64::from(row_height);
        let delta = dragged - self.paged;
        self.paged = dragged;
        TouchOutcome::Paged(delta)
    }

    pub fn end(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }
}

/// Scroll slice of the viewer store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    index: usize,
    row_index: usize,
    max_row_index: usize,
    /// Rows per wheel notch.
    pub speed: usize,
    /// Extra rows rendered on each side of the viewport.
    pub overscan_count: usize,
    /// Placement used by [`scroll_to`](Self::scroll_to).
    pub placement: Placement,
    len: usize,
    columns: usize,
    rows: usize,
    touch: TouchTracker,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            index: 0,
            row_index: 0,
            max_row_index: 0,
            speed: DEFAULT_SPEED,
            overscan_count: DEFAULT_OVERSCAN,
            placement: Placement::default(),
            len: 0,
            columns: 0,
            rows: 0,
            touch: TouchTracker::default(),
        }
    }
}

impl ScrollState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rows per wheel notch (at least one).
    #[must_use]
    pub fn with_speed(mut self, speed: usize) -> Self {
        self.speed = speed.max(1);
        self
    }

    /// Set the overscan row count.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan_count = overscan;
        self
    }

    /// First visible byte.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// First visible row.
    #[must_use]
    pub const fn row_index(&self) -> usize {
        self.row_index
    }

    #[must_use]
    pub const fn max_row_index(&self) -> usize {
        self.max_row_index
    }

    /// Total rows in the buffer.
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.len.div_ceil(self.columns)
        }
    }

    #[must_use]
    pub const fn touch(&self) -> &TouchTracker {
        &self.touch
    }

    /// Update buffer length and grid shape.
    ///
    /// The first visible byte is kept on the top row so a resize does not
    /// jump to unrelated content.
    pub fn set_bounds(&mut self, len: usize, columns: usize, rows: usize) {
        self.len = len;
        self.columns = columns;
        self.rows = rows;
        self.max_row_index = self.total_rows().saturating_sub(rows);
        let row = self.index.checked_div(columns).unwrap_or(0);
        self.set_row(row);
        hexview_core::trace!(
            len,
            columns,
            rows,
            max_row_index = self.max_row_index,
            row_index = self.row_index,
            "scroll bounds"
        );
    }

    fn set_row(&mut self, row: usize) -> bool {
        let row = row.min(self.max_row_index);
        let changed = row != self.row_index;
        self.row_index = row;
        self.index = row * self.columns;
        changed
    }

    fn set_row_signed(&mut self, row: i64) -> bool {
        self.set_row(hexview_core::geometry::clamp_index(row, self.max_row_index))
    }

    /// Scroll by `delta` rows. Returns whether the top row changed.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        self.set_row_signed((self.row_index as i64).saturating_add(delta))
    }

    /// Put `row` on top, clamped.
    pub fn scroll_to_row(&mut self, row: usize) -> bool {
        self.set_row(row)
    }

    /// One wheel event of `notches`.
    pub fn wheel(&mut self, notches: i32) -> bool {
        self.scroll_by(i64::from(notches) * self.speed as i64)
    }

    /// Scroll by whole pages.
    pub fn page(&mut self, pages: i64) -> bool {
        self.scroll_by(pages.saturating_mul(self.rows.max(1) as i64))
    }

    pub fn scroll_to_start(&mut self) -> bool {
        self.set_row(0)
    }

    pub fn scroll_to_end(&mut self) -> bool {
        self.set_row(self.max_row_index)
    }

    /// Bring `index` into view with the default placement.
    pub fn scroll_to(&mut self, index: usize) -> bool {
        self.scroll_to_index(index, self.placement)
    }

    /// Bring byte `index` into view according to `placement`.
    pub fn scroll_to_index(&mut self, index: usize, placement: Placement) -> bool {
        let Some(target) = index.checked_div(self.columns) else {
            return false;
        };
        let target = target as i64;
        let top = self.row_index as i64;
        let rows = self.rows.max(1) as i64;
        let bottom = top + rows - 1;
        let visible = target >= top && target <= bottom;
        let include = || {
            if target < top {
                target
            } else if target > bottom {
                target - rows + 1
            } else {
                top
            }
        };
        let middle = target - rows / 2;

        let row = match placement {
            Placement::Top => target,
            Placement::Bottom => target - rows + 1,
            Placement::Middle => middle,
            Placement::Include => include(),
            Placement::IncludeMiddle if visible => top,
            Placement::IncludeMiddle => middle,
            Placement::Smart if visible => top,
            Placement::Smart if target >= top - rows && target <= bottom + rows => include(),
            Placement::Smart => middle,
        };
        self.set_row_signed(row)
    }

    #[must_use]
    pub const fn is_row_visible(&self, row: usize) -> bool {
        row >= self.row_index && row < self.row_index + self.rows
    }

    /// Whether byte `index` is on a visible row.
    #[must_use]
    pub fn is_index_visible(&self, index: usize) -> bool {
        index
            .checked_div(self.columns)
            .is_some_and(|row| index < self.len && self.is_row_visible(row))
    }

    /// Rows to render this frame.
    #[must_use]
    pub fn window(&self) -> RenderWindow {
        let total = self.total_rows();
        let visible_end = (self.row_index + self.rows).min(total);
        let visible = self.row_index.min(visible_end)..visible_end;
        let start = self.row_index.saturating_sub(self.overscan_count);
        let end = visible_end.saturating_add(self.overscan_count).min(total);
        RenderWindow {
            visible,
            rows: start.min(end)..end,
            columns: self.columns,
        }
    }

    pub fn touch_start(&mut self, x: i32, y: i32) {
        self.touch.start(x, y);
    }

    /// Follow a touch move, paging while the gesture is fresh.
    pub fn touch_move(&mut self, x: i32, y: i32, row_height: u32) -> TouchOutcome {
        let outcome = self.touch.track(x, y, row_height);
        if let TouchOutcome::Paged(delta) = outcome {
            self.scroll_by(delta);
        }
        outcome
    }

    pub fn touch_end(&mut self) {
        self.touch.end();
    }
}

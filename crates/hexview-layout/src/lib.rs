#![forbid(unsafe_code)]

//! Layout engine: grid dimensions from measured container size.
//!
//! The engine turns a container size in pixels into a `{columns, rows}` grid.
//! Columns come from the [`ColumnLadder`], rows from the row height. When
//! either dimension is zero the layout is flagged instead of rendered.
//!
//! # Invariants
//!
//! - `columns` is `0` or a ladder value.
//! - `columns(w1) <= columns(w2)` whenever `w1 <= w2`.
//! - `WIDTH_TOO_SMALL` is set exactly when `columns == 0`, `HEIGHT_TOO_SMALL`
//!   exactly when `rows == 0`.

pub mod ladder;

use bitflags::bitflags;
pub use hexview_core::geometry::Size;
pub use ladder::{ColumnLadder, Rung};

/// Fixed pixel metrics of the rendered cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellMetrics {
    /// Height of one row.
    pub row_height: u32,
    /// Width of the offset column.
    pub offset_width: u32,
    /// Width of one hex cell.
    pub hex_width: u32,
    /// Width of one text cell.
    pub text_width: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            row_height: 18,
            offset_width: 90,
            hex_width: 22,
            text_width: 10,
        }
    }
}

impl CellMetrics {
    /// Pixel width of a row with `columns` bytes in `mode`.
    #[must_use]
    pub const fn row_width(&self, columns: usize, mode: DisplayMode) -> u64 {
        let per_byte = match mode {
            DisplayMode::Dual => self.hex_width + self.text_width,
            DisplayMode::Hex => self.hex_width,
            DisplayMode::Text => self.text_width,
        };
        self.offset_width as u64 + columns as u64 * per_byte as u64
    }
}

/// Which panes are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Hex and text side by side.
    #[default]
    Dual,
    /// Hex pane only.
    Hex,
    /// Text pane only.
    Text,
}

impl DisplayMode {
    #[must_use]
    pub const fn shows_hex(self) -> bool {
        matches!(self, Self::Dual | Self::Hex)
    }

    #[must_use]
    pub const fn shows_text(self) -> bool {
        matches!(self, Self::Dual | Self::Text)
    }
}

/// Which region owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    #[default]
    None,
    /// The search toolbar.
    Toolbar,
    /// The byte grid.
    Body,
}

bitflags! {
    /// Reasons the grid cannot be rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayoutFlags: u8 {
        /// Container narrower than the smallest ladder rung.
        const WIDTH_TOO_SMALL  = 0b01;
        /// Container shorter than one row.
        const HEIGHT_TOO_SMALL = 0b10;
    }
}

/// Optional user caps on the computed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridLimits {
    /// Cap on columns. Ignored unless it is a ladder value.
    pub max_columns: Option<usize>,
    /// Cap on rows.
    pub max_rows: Option<usize>,
}

/// Result of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub flags: LayoutFlags,
}

impl GridLayout {
    /// Whether the grid can be rendered.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Computes [`GridLayout`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutEngine {
    ladder: ColumnLadder,
    metrics: CellMetrics,
    limits: GridLimits,
}

impl LayoutEngine {
    #[must_use]
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    /// Replace the ladder.
    #[must_use]
    pub fn with_ladder(mut self, ladder: ColumnLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Apply user caps.
    #[must_use]
    pub fn with_limits(mut self, limits: GridLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn ladder(&self) -> &ColumnLadder {
        &self.ladder
    }

    #[must_use]
    pub const fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    /// Columns for a width, after caps.
    #[must_use]
    pub fn columns(&self, width: u32) -> usize {
        let columns = self.ladder.columns_for_width(width);
        match self.limits.max_columns {
            Some(cap) if self.ladder.contains(cap) => columns.min(cap),
            _ => columns,
        }
    }

    /// Rows for a height, after caps.
    #[must_use]
    pub fn rows(&self, height: u32) -> usize {
        let rows = height
            .checked_div(self.metrics.row_height)
            .unwrap_or(0) as usize;
        match self.limits.max_rows {
            Some(cap) => rows.min(cap),
            None => rows,
        }
    }

    /// Lay out a container of `size` pixels.
    #[must_use]
    pub fn compute(&self, size: Size) -> GridLayout {
        let columns = self.columns(size.width);
        let rows = self.rows(size.height);
        let mut flags = LayoutFlags::empty();
        flags.set(LayoutFlags::WIDTH_TOO_SMALL, columns == 0);
        flags.set(LayoutFlags::HEIGHT_TOO_SMALL, rows == 0);
        GridLayout {
            columns,
            rows,
            flags,
        }
    }
}

/// Layout slice of the viewer store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutState {
    pub columns: usize,
    pub rows: usize,
    pub display_mode: DisplayMode,
    pub focus: Focus,
    /// Last measured container size.
    pub size: Size,
    pub flags: LayoutFlags,
    pub fullscreen: bool,
    /// Resize received during a drag, applied when the drag ends.
    pub deferred: Option<Size>,
}

impl LayoutState {
    /// Take the dimensions of a fresh layout pass.
    pub fn apply(&mut self, size: Size, grid: GridLayout) {
        self.size = size;
        self.columns = grid.columns;
        self.rows = grid.rows;
        self.flags = grid.flags;
        self.deferred = None;
    }

    /// Bytes visible in one screen.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.columns * self.rows
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.flags.is_empty() && self.columns > 0 && self.rows > 0
    }
}

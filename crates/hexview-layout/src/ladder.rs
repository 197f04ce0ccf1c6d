#![forbid(unsafe_code)]

//! Width→columns ladder.
//!
//! Column counts are not computed from cell widths. They come from a fixed
//! table of width thresholds so the grid snaps to a small set of familiar
//! shapes (8, 16, 32, ... bytes per row) instead of drifting by one column
//! on every pixel of resize.
//!
//! | Min width (px) | Columns |
//! |---------------:|--------:|
//! | 4750           | 128     |
//! | 4155           | 112     |
//! | 3560           | 96      |
//! | 2965           | 80      |
//! | 2370           | 64      |
//! | 1775           | 48      |
//! | 1475           | 40      |
//! | 1180           | 32      |
//! | 880            | 24      |
//! | 730            | 20      |
//! | 585            | 16      |
//! | 435            | 12      |
//! | 285            | 8       |
//! | below          | 0       |

/// One step of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rung {
    /// Minimum container width in pixels.
    pub min_width: u32,
    /// Columns shown at or above `min_width`.
    pub columns: usize,
}

impl Rung {
    #[must_use]
    pub const fn new(min_width: u32, columns: usize) -> Self {
        Self { min_width, columns }
    }
}

const DEFAULT_RUNGS: [Rung; 13] = [
    Rung::new(4750, 128),
    Rung::new(4155, 112),
    Rung::new(3560, 96),
    Rung::new(2965, 80),
    Rung::new(2370, 64),
    Rung::new(1775, 48),
    Rung::new(1475, 40),
    Rung::new(1180, 32),
    Rung::new(880, 24),
    Rung::new(730, 20),
    Rung::new(585, 16),
    Rung::new(435, 12),
    Rung::new(285, 8),
];

/// Descending table of width thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLadder {
    rungs: Vec<Rung>,
}

impl Default for ColumnLadder {
    fn default() -> Self {
        Self {
            rungs: DEFAULT_RUNGS.to_vec(),
        }
    }
}

impl ColumnLadder {
    /// Build a ladder from arbitrary rungs.
    ///
    /// Rungs are sorted by descending width and column counts are forced to
    /// be non-increasing along the way down, so a wider container never gets
    /// fewer columns. Zero-column rungs are dropped.
    #[must_use]
    pub fn new(rungs: impl IntoIterator<Item = Rung>) -> Self {
        let mut rungs: Vec<Rung> = rungs.into_iter().filter(|r| r.columns > 0).collect();
        rungs.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        let mut ceiling = usize::MAX;
        for rung in &mut rungs {
            rung.columns = rung.columns.min(ceiling);
            ceiling = rung.columns;
        }
        Self { rungs }
    }

    /// Columns for a container of `width` pixels; `0` when nothing fits.
    #[must_use]
    pub fn columns_for_width(&self, width: u32) -> usize {
        self.rungs
            .iter()
            .find(|r| width >= r.min_width)
            .map_or(0, |r| r.columns)
    }

    /// Whether `columns` is one of the ladder values.
    #[must_use]
    pub fn contains(&self, columns: usize) -> bool {
        self.rungs.iter().any(|r| r.columns == columns)
    }

    /// Smallest width that shows any column.
    #[must_use]
    pub fn min_width(&self) -> u32 {
        self.rungs.last().map_or(u32::MAX, |r| r.min_width)
    }

    /// Rungs from widest to narrowest.
    #[must_use]
    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder_spot_checks() {
        let ladder = ColumnLadder::default();
        assert_eq!(ladder.columns_for_width(10_000), 128);
        assert_eq!(ladder.columns_for_width(4750), 128);
        assert_eq!(ladder.columns_for_width(4749), 112);
        assert_eq!(ladder.columns_for_width(3000), 80);
        assert_eq!(ladder.columns_for_width(600), 16);
        assert_eq!(ladder.columns_for_width(285), 8);
        assert_eq!(ladder.columns_for_width(284), 0);
        assert_eq!(ladder.columns_for_width(0), 0);
        assert_eq!(ladder.min_width(), 285);
    }

    #[test]
    fn custom_rungs_are_sanitized() {
        let ladder = ColumnLadder::new([
            Rung::new(100, 4),
            Rung::new(500, 2),
            Rung::new(300, 8),
            Rung::new(50, 0),
        ]);
        // Sorted descending, columns capped by the wider rung above.
        assert_eq!(
            ladder.rungs(),
            &[Rung::new(500, 2), Rung::new(300, 2), Rung::new(100, 2)][..]
        );
        assert_eq!(ladder.columns_for_width(1000), 2);
        assert_eq!(ladder.columns_for_width(200), 2);
        assert_eq!(ladder.columns_for_width(99), 0);
    }

    #[test]
    fn contains_only_ladder_values() {
        let ladder = ColumnLadder::default();
        assert!(ladder.contains(16));
        assert!(!ladder.contains(17));
        assert!(!ladder.contains(0));
    }
}

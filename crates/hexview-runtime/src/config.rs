#![forbid(unsafe_code)]

//! Viewer configuration.
//!
//! [`ViewerConfig`] gathers everything a host may tune: cell metrics, grid
//! limits, display mode, offset formatting, placeholders, scroll feel, the
//! throttle delay, history size and the default search mode. Builders follow
//! the `with_*` convention; [`Validatable::validate`] clamps out-of-range
//! values instead of rejecting them.
//!
//! With the `settings` feature, [`Settings`] is a flat serde mirror of the
//! config that loads from and saves to JSON.

use std::time::Duration;

use hexview_core::bytes::Placeholders;
use hexview_layout::{CellMetrics, ColumnLadder, DisplayMode, GridLimits, LayoutEngine};
use hexview_text::SearchMode;
use hexview_widgets::virtualized::{DEFAULT_OVERSCAN, DEFAULT_SPEED};
use hexview_widgets::{OffsetFormat, ScrollState};

use crate::traits::Validatable;

/// Default trailing delay for throttled input.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(15);

/// Longest accepted throttle delay.
pub const MAX_THROTTLE: Duration = Duration::from_secs(1);

/// Default number of remembered searches.
pub const DEFAULT_HISTORY: usize = 10;

/// Host features the viewer may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub clipboard: bool,
    pub fullscreen: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            clipboard: true,
            fullscreen: true,
        }
    }
}

impl Capabilities {
    /// Nothing optional available.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            clipboard: false,
            fullscreen: false,
        }
    }
}

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Pixel sizes used by the layout engine.
    pub metrics: CellMetrics,
    /// Width thresholds for the column count.
    pub ladder: ColumnLadder,
    /// Column and row caps.
    pub limits: GridLimits,
    /// Initial display mode.
    pub display_mode: DisplayMode,
    /// Offset column base and width.
    pub offset: OffsetFormat,
    /// Characters for undisplayable bytes in the text pane.
    pub placeholders: Placeholders,
    /// Rows per wheel notch.
    pub scroll_speed: usize,
    /// Rows materialized above and below the visible window.
    pub overscan: usize,
    /// Trailing delay for hover, wheel and touch-move.
    pub throttle_delay: Duration,
    /// Number of remembered searches.
    pub history_size: usize,
    /// Search mode after mount.
    pub search_mode: SearchMode,
    /// Host features.
    pub capabilities: Capabilities,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            metrics: CellMetrics::default(),
            ladder: ColumnLadder::default(),
            limits: GridLimits::default(),
            display_mode: DisplayMode::default(),
            offset: OffsetFormat::default(),
            placeholders: Placeholders::default(),
            scroll_speed: DEFAULT_SPEED,
            overscan: DEFAULT_OVERSCAN,
            throttle_delay: DEFAULT_THROTTLE,
            history_size: DEFAULT_HISTORY,
            search_mode: SearchMode::default(),
            capabilities: Capabilities::default(),
        }
    }
}

impl ViewerConfig {
    #[must_use]
    pub fn with_metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_ladder(mut self, ladder: ColumnLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Cap the column count. Only ladder values take effect.
    #[must_use]
    pub fn with_max_columns(mut self, columns: usize) -> Self {
        self.limits.max_columns = Some(columns);
        self
    }

    #[must_use]
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.limits.max_rows = Some(rows);
        self
    }

    #[must_use]
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: OffsetFormat) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    #[must_use]
    pub fn with_scroll_speed(mut self, speed: usize) -> Self {
        self.scroll_speed = speed;
        self
    }

    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    #[must_use]
    pub fn with_throttle_delay(mut self, delay: Duration) -> Self {
        self.throttle_delay = delay;
        self
    }

    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    #[must_use]
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Layout engine for these metrics, ladder and limits.
    #[must_use]
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.metrics)
            .with_ladder(self.ladder.clone())
            .with_limits(self.limits)
    }

    /// Fresh scroll controller with the configured feel.
    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState::new()
            .with_speed(self.scroll_speed)
            .with_overscan(self.overscan)
    }
}

impl Validatable for ViewerConfig {
    type Bounds = ();

    fn validate(mut self, _: &()) -> Self {
        self.scroll_speed = self.scroll_speed.max(1);
        self.history_size = self.history_size.max(1);
        self.throttle_delay = self.throttle_delay.min(MAX_THROTTLE);
        self.metrics.row_height = self.metrics.row_height.max(1);
        self.limits.max_rows = self.limits.max_rows.map(|rows| rows.max(1));
        self
    }
}

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError};

#[cfg(feature = "settings")]
mod settings {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    use super::*;
    use hexview_widgets::OffsetBase;

    /// Error loading or saving [`Settings`].
    #[derive(Debug)]
    pub enum SettingsError {
        /// Malformed JSON or a field of the wrong type.
        Json(serde_json::Error),
        /// Offset base other than 8, 10 or 16.
        InvalidBase(u32),
        /// Unknown display mode name.
        InvalidDisplayMode(String),
    }

    impl fmt::Display for SettingsError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Json(e) => write!(f, "settings JSON error: {e}"),
                Self::InvalidBase(b) => write!(f, "offset base {b} is not one of 8, 10, 16"),
                Self::InvalidDisplayMode(m) => write!(f, "unknown display mode: {m}"),
            }
        }
    }

    impl std::error::Error for SettingsError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                Self::Json(e) => Some(e),
                _ => None,
            }
        }
    }

    impl From<serde_json::Error> for SettingsError {
        fn from(e: serde_json::Error) -> Self {
            Self::Json(e)
        }
    }

    /// Flat, serializable view of the tunable parts of [`ViewerConfig`].
    ///
    /// Missing fields take their defaults.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Settings {
        pub offset_base: u32,
        pub offset_width: usize,
        pub null_char: char,
        pub non_printable_char: char,
        pub higher_char: char,
        pub max_columns: Option<usize>,
        pub max_rows: Option<usize>,
        pub display_mode: String,
        pub scroll_speed: usize,
        pub overscan: usize,
        pub throttle_ms: u64,
        pub history_size: usize,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self::from(&ViewerConfig::default())
        }
    }

    impl From<&ViewerConfig> for Settings {
        fn from(config: &ViewerConfig) -> Self {
            Self {
                offset_base: config.offset.base.radix(),
                offset_width: config.offset.width,
                null_char: config.placeholders.null,
                non_printable_char: config.placeholders.non_printable,
                higher_char: config.placeholders.higher,
                max_columns: config.limits.max_columns,
                max_rows: config.limits.max_rows,
                display_mode: display_mode_name(config.display_mode).to_owned(),
                scroll_speed: config.scroll_speed,
                overscan: config.overscan,
                throttle_ms: u64::try_from(config.throttle_delay.as_millis()).unwrap_or(u64::MAX),
                history_size: config.history_size,
            }
        }
    }

    fn display_mode_name(mode: DisplayMode) -> &'static str {
        match mode {
            DisplayMode::Dual => "dual",
            DisplayMode::Hex => "hex",
            DisplayMode::Text => "text",
        }
    }

    fn parse_display_mode(name: &str) -> Option<DisplayMode> {
        match name {
            "dual" => Some(DisplayMode::Dual),
            "hex" => Some(DisplayMode::Hex),
            "text" => Some(DisplayMode::Text),
            _ => None,
        }
    }

    impl Settings {
        /// Parse settings from JSON.
        pub fn from_json(json: &str) -> Result<Self, SettingsError> {
            Ok(serde_json::from_str(json)?)
        }

        /// Pretty-printed JSON.
        pub fn to_json(&self) -> Result<String, SettingsError> {
            Ok(serde_json::to_string_pretty(self)?)
        }

        /// Apply onto `config`, leaving untouched what settings do not cover.
        /// The result is validated.
        pub fn apply(&self, mut config: ViewerConfig) -> Result<ViewerConfig, SettingsError> {
            let base = OffsetBase::from_radix(self.offset_base)
                .ok_or(SettingsError::InvalidBase(self.offset_base))?;
            let mode = parse_display_mode(&self.display_mode)
                .ok_or_else(|| SettingsError::InvalidDisplayMode(self.display_mode.clone()))?;
            config.offset = OffsetFormat {
                base,
                width: self.offset_width,
            };
            config.placeholders = Placeholders {
                null: self.null_char,
                non_printable: self.non_printable_char,
                higher: self.higher_char,
            };
            config.limits = GridLimits {
                max_columns: self.max_columns,
                max_rows: self.max_rows,
            };
            config.display_mode = mode;
            config.scroll_speed = self.scroll_speed;
            config.overscan = self.overscan;
            config.throttle_delay = Duration::from_millis(self.throttle_ms);
            config.history_size = self.history_size;
            Ok(config.validate(&()))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.throttle_delay, Duration::from_millis(15));
        assert_eq!(config.history_size, 10);
        assert_eq!(config.scroll_speed, 3);
        assert_eq!(config.overscan, 30);
        assert!(config.capabilities.clipboard);
    }

    #[test]
    fn validate_clamps() {
        let config = ViewerConfig::default()
            .with_scroll_speed(0)
            .with_history_size(0)
            .with_max_rows(0)
            .with_throttle_delay(Duration::from_secs(30))
            .validate(&());
        assert_eq!(config.scroll_speed, 1);
        assert_eq!(config.history_size, 1);
        assert_eq!(config.limits.max_rows, Some(1));
        assert_eq!(config.throttle_delay, MAX_THROTTLE);
    }

    #[test]
    fn engine_uses_limits() {
        let engine = ViewerConfig::default().with_max_rows(2).layout_engine();
        assert_eq!(engine.rows(10_000), 2);
    }
}

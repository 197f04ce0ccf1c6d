#![forbid(unsafe_code)]

//! The viewer store: every slice of state in one struct.
//!
//! Each slice is written only by its own reducer (see [`crate::reducer`]);
//! reducers may read any slice.
//!
//! # Lifecycle
//!
//! ```text
//! Loading ──load(ok)──▶ Initialized ──resize──▶ Active
//!    │                       │                    │ ▲
//!    │ load(none/blank)      │                    ▼ │ resize
//!    ▼                       │                 Error(layout)
//!  Empty    load(malformed) ─┴──▶ Error(data)  (kept until the next load)
//! ```

use hexview_core::bytes::ByteBuffer;
use hexview_core::cursor::CursorState;
use hexview_core::selection::SelectionState;
use hexview_layout::LayoutState;
use hexview_text::SearchState;
use hexview_widgets::{CellContext, ScrollState};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::history::SearchHistory;
use crate::traits::Validatable;

/// Progress of the data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadStatus {
    /// Nothing loaded yet.
    #[default]
    Idle,
    /// The host is still fetching.
    Loading,
    /// Data parsed.
    Ready,
    /// No data, or blank data.
    Empty,
    /// Data did not parse.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Loading {
    pub status: LoadStatus,
    pub message: Option<String>,
    /// Percent, 0 to 100.
    pub progress: u8,
    /// Data errors of the last load.
    pub errors: Vec<ViewerError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lifecycle {
    /// Data parsed and the container measured at least once.
    pub initialized: bool,
    /// A container size has been received.
    pub measured: bool,
    pub loading: Loading,
}

/// Cell under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HoverState {
    pub index: Option<usize>,
}

/// What the viewer can show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerStatus {
    /// No data yet.
    Loading,
    /// No data to show; renders nothing.
    Empty,
    /// Data parsed, waiting for the first measurement.
    Initialized,
    /// Grid on screen.
    Active,
    /// Data or layout problems.
    Error(Vec<ViewerError>),
}

impl ViewerStatus {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn errors(&self) -> &[ViewerError] {
        match self {
            Self::Error(errors) => errors,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub config: ViewerConfig,
    pub buffer: Option<ByteBuffer>,
    pub lifecycle: Lifecycle,
    pub layout: LayoutState,
    pub cursor: CursorState,
    pub hover: HoverState,
    pub select: SelectionState,
    pub search: SearchState,
    pub scroll: ScrollState,
    pub history: SearchHistory,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl Store {
    /// Empty store for `config` (validated first).
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let config = config.validate(&());
        let layout = LayoutState {
            display_mode: config.display_mode,
            ..LayoutState::default()
        };
        Self {
            buffer: None,
            lifecycle: Lifecycle::default(),
            layout,
            cursor: CursorState::default(),
            hover: HoverState::default(),
            select: SelectionState::default(),
            search: SearchState::new(config.search_mode),
            scroll: config.scroll_state(),
            history: SearchHistory::new(config.history_size),
            config,
        }
    }

    /// Buffer length, 0 without data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, ByteBuffer::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw bytes, empty without data.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.buffer.as_ref().map(ByteBuffer::as_bytes).unwrap_or_default()
    }

    /// Highlighting inputs for the cell renderer.
    #[must_use]
    pub fn cell_context(&self) -> CellContext<'_> {
        CellContext {
            cursor: self.cursor.index,
            hover: self.hover.index,
            selection: self.select.range(),
            search: &self.search,
        }
    }

    #[must_use]
    pub fn status(&self) -> ViewerStatus {
        let loading = &self.lifecycle.loading;
        match loading.status {
            LoadStatus::Idle | LoadStatus::Loading => return ViewerStatus::Loading,
            LoadStatus::Empty => return ViewerStatus::Empty,
            LoadStatus::Failed => return ViewerStatus::Error(loading.errors.clone()),
            LoadStatus::Ready => {}
        }
        if !self.lifecycle.initialized {
            return ViewerStatus::Initialized;
        }
        let errors = ViewerError::from_flags(self.layout.flags);
        if errors.is_empty() {
            ViewerStatus::Active
        } else {
            ViewerStatus::Error(errors)
        }
    }
}

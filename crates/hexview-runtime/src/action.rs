#![forbid(unsafe_code)]

//! Actions and commands.
//!
//! [`Action`] is the single tagged union every reducer receives. [`Cmd`] is
//! what a reducer asks the viewer to do afterwards: write the clipboard or
//! dispatch a follow-up action.

use std::fmt;

use hexview_core::event::CellTarget;
use hexview_core::geometry::Size;
use hexview_layout::{DisplayMode, Focus};
use hexview_text::{SearchKind, SearchMode};
use hexview_widgets::Placement;

use crate::location::LocationState;

/// Everything that can happen to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ──
    /// Replace the data. `None` or blank text shows nothing.
    Load(Option<String>),
    /// Report fetch progress while the host is still loading.
    SetLoading { message: Option<String>, progress: u8 },
    /// New container size.
    Resize(Size),

    // ── Pointer ──
    /// Primary button pressed on a cell.
    CellDown(CellTarget),
    /// Pointer entered a cell.
    CellHover(usize),
    /// Pointer left the grid.
    PointerLeave,
    /// Button released anywhere.
    PointerUp,
    /// Button pressed outside the grid.
    ClickAway,

    // ── Cursor and selection ──
    SetCursor(usize),
    /// Move the cursor; with `extend`, grow the selection along.
    MoveCursor { delta: i64, extend: bool },
    ClearCursor,
    SetSelection { start: usize, end: usize },
    ClearSelection,

    // ── Search ──
    SetSearchQuery(String),
    SetSearchMode(SearchMode),
    SearchNext,
    SearchPrevious,
    /// Select result `i`, wrapping.
    SelectResult(i64),
    /// Enter in the search bar: remember the query and go to the next result.
    CommitSearch,
    ClearSearch,
    /// Walk the search history; positive is older.
    HistoryStep(i32),
    HistoryReset,
    /// Put a remembered search back into the bar.
    RecallSearch { kind: SearchKind, value: String },

    // ── Scroll ──
    ScrollBy(i64),
    ScrollToRow(usize),
    ScrollToIndex { index: usize, placement: Placement },
    Wheel(i32),
    Page(i64),
    TouchStart { x: i32, y: i32 },
    TouchMove { x: i32, y: i32 },
    TouchEnd,

    // ── Layout ──
    SetFocus(Focus),
    SetDisplayMode(DisplayMode),
    ToggleFullscreen,

    // ── Collaborators ──
    /// Copy the selection or the cursor byte.
    Copy,
    /// Copy a link to the current view.
    Share { base: String },
    /// Apply a decoded location query.
    RestoreLocation(LocationState),
}

impl Action {
    /// Short name for logs and spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::SetLoading { .. } => "set_loading",
            Self::Resize(_) => "resize",
            Self::CellDown(_) => "cell_down",
            Self::CellHover(_) => "cell_hover",
            Self::PointerLeave => "pointer_leave",
            Self::PointerUp => "pointer_up",
            Self::ClickAway => "click_away",
            Self::SetCursor(_) => "set_cursor",
            Self::MoveCursor { .. } => "move_cursor",
            Self::ClearCursor => "clear_cursor",
            Self::SetSelection { .. } => "set_selection",
            Self::ClearSelection => "clear_selection",
            Self::SetSearchQuery(_) => "set_search_query",
            Self::SetSearchMode(_) => "set_search_mode",
            Self::SearchNext => "search_next",
            Self::SearchPrevious => "search_previous",
            Self::SelectResult(_) => "select_result",
            Self::CommitSearch => "commit_search",
            Self::ClearSearch => "clear_search",
            Self::HistoryStep(_) => "history_step",
            Self::HistoryReset => "history_reset",
            Self::RecallSearch { .. } => "recall_search",
            Self::ScrollBy(_) => "scroll_by",
            Self::ScrollToRow(_) => "scroll_to_row",
            Self::ScrollToIndex { .. } => "scroll_to_index",
            Self::Wheel(_) => "wheel",
            Self::Page(_) => "page",
            Self::TouchStart { .. } => "touch_start",
            Self::TouchMove { .. } => "touch_move",
            Self::TouchEnd => "touch_end",
            Self::SetFocus(_) => "set_focus",
            Self::SetDisplayMode(_) => "set_display_mode",
            Self::ToggleFullscreen => "toggle_fullscreen",
            Self::Copy => "copy",
            Self::Share { .. } => "share",
            Self::RestoreLocation(_) => "restore_location",
        }
    }

    /// Throttle merge: consecutive queued hovers collapse to the newest one and
    /// wheel notches add up. Returns whether `next` was absorbed.
    pub fn merge(queued: &mut Self, next: &Self) -> bool {
        match (queued, next) {
            (Self::CellHover(a), Self::CellHover(b)) => {
                *a = *b;
                true
            }
            (Self::Wheel(a), Self::Wheel(b)) => {
                *a = a.saturating_add(*b);
                true
            }
            _ => false,
        }
    }
}

/// Side effect requested by a reducer.
#[derive(Default, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Nothing to do.
    #[default]
    None,
    /// Several commands, run in order.
    Batch(Vec<Cmd>),
    /// Dispatch a follow-up action once the current one is done.
    Msg(Action),
    /// Write copied bytes to the clipboard.
    Copy(String),
    /// Write a share link to the clipboard.
    Share(String),
}

impl fmt::Debug for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(action) => f.debug_tuple("Msg").field(&action.name()).finish(),
            Self::Copy(text) => f.debug_struct("Copy").field("len", &text.len()).finish(),
            Self::Share(url) => f.debug_tuple("Share").field(url).finish(),
        }
    }
}

impl Cmd {
    /// Collapse a list of commands, dropping the empty ones.
    #[must_use]
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub fn msg(action: Action) -> Self {
        Self::Msg(action)
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

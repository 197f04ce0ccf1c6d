#![forbid(unsafe_code)]

//! hexview public facade crate.
//!
//! Re-exports the types a host needs to embed the viewer, plus an [`Error`]
//! that covers every failure the lower crates report.
//!
//! ```
//! use hexview::prelude::*;
//!
//! let mut viewer = HexViewer::default();
//! viewer.load(Some("48 65 6c 6c 6f"));
//! viewer.resize(Size::new(640, 180));
//! assert!(viewer.status().is_active());
//! assert_eq!(viewer.rows()[0].offset, "00000000");
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use hexview_core::bytes::{ByteBuffer, DataError};
pub use hexview_core::cursor::CursorState;
pub use hexview_core::event::{
    CellTarget, Event, KeyCode, KeyEvent, Modifiers, MouseButton, Pane, PointerEvent,
    PointerKind, TouchEvent, TouchPhase, WheelEvent,
};
pub use hexview_core::geometry::Size;
pub use hexview_core::selection::{SelectRange, SelectionState};

// --- Layout re-exports -----------------------------------------------------

pub use hexview_layout::{
    CellMetrics, ColumnLadder, DisplayMode, Focus, GridLayout, GridLimits, LayoutEngine,
    LayoutFlags, LayoutState, Rung,
};

// --- Text re-exports -------------------------------------------------------

pub use hexview_text::{Encoding, SearchKind, SearchMode, SearchResult, SearchState};

// --- Widget re-exports -----------------------------------------------------

pub use hexview_widgets::{
    CellClass, CellView, OffsetBase, OffsetFormat, Placement, RenderWindow, RowView, ScrollState,
};

// --- Runtime re-exports ----------------------------------------------------

pub use hexview_runtime::{
    Action, Capabilities, ClipboardError, ClipboardSink, Controls, HexViewer, LocationState,
    MemoryClipboard, Message, Osc52Clipboard, Serializable, Subscription, Topic,
    UnavailableClipboard, ViewerConfig, ViewerError, ViewerStatus,
};
#[cfg(feature = "settings")]
pub use hexview_runtime::config::{Settings, SettingsError};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hexview hosts.
#[derive(Debug)]
pub enum Error {
    /// Hex input did not parse.
    Data(DataError),
    /// The viewer cannot show its data.
    Viewer(ViewerError),
    /// Copy or share could not reach the clipboard.
    Clipboard(ClipboardError),
    /// Settings JSON was rejected.
    #[cfg(feature = "settings")]
    Settings(SettingsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(err) => write!(f, "{err}"),
            Self::Viewer(err) => write!(f, "{err}"),
            Self::Clipboard(err) => write!(f, "{err}"),
            #[cfg(feature = "settings")]
            Self::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Data(err) => Some(err),
            Self::Viewer(err) => Some(err),
            Self::Clipboard(err) => Some(err),
            #[cfg(feature = "settings")]
            Self::Settings(err) => Some(err),
        }
    }
}

impl From<DataError> for Error {
    fn from(err: DataError) -> Self {
        Self::Data(err)
    }
}

impl From<ViewerError> for Error {
    fn from(err: ViewerError) -> Self {
        Self::Viewer(err)
    }
}

impl From<ClipboardError> for Error {
    fn from(err: ClipboardError) -> Self {
        Self::Clipboard(err)
    }
}

#[cfg(feature = "settings")]
impl From<SettingsError> for Error {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}

impl Error {
    /// The first problem a viewer status reports, if any.
    #[must_use]
    pub fn from_status(status: &ViewerStatus) -> Option<Self> {
        status.errors().first().cloned().map(Self::Viewer)
    }
}

/// Standard result type for hexview APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse hex text into a buffer.
pub fn parse(hex: &str) -> Result<ByteBuffer> {
    Ok(ByteBuffer::from_hex(hex)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Action, DisplayMode, Error, Event, HexViewer, KeyCode, KeyEvent, LocationState, Message,
        Modifiers, PointerEvent, Result, SearchKind, Serializable, Size, Topic, ViewerConfig,
        ViewerStatus,
    };

    pub use crate::{core, layout, runtime, text, widgets};
}

pub use hexview_core as core;
pub use hexview_layout as layout;
pub use hexview_runtime as runtime;
pub use hexview_text as text;
pub use hexview_widgets as widgets;

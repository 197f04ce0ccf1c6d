#![forbid(unsafe_code)]

//! Viewer errors.
//!
//! These are surfaced as state through
//! [`ViewerStatus::Error`](crate::store::ViewerStatus::Error), never returned
//! from the viewer API.

use std::fmt;

use hexview_core::bytes::DataError;
use hexview_layout::LayoutFlags;

/// Optional host feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Clipboard,
    Fullscreen,
}

impl Feature {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clipboard => "clipboard",
            Self::Fullscreen => "fullscreen",
        }
    }
}

/// Why the viewer cannot show its grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// The input text is not a hex byte string. Kept until the next load.
    DataInvalid(DataError),
    /// The container is narrower than the smallest ladder rung.
    WidthTooSmall,
    /// The container cannot hold a single row.
    HeightTooSmall,
    /// A control needs a host feature that is not there.
    Unsupported(Feature),
}

impl ViewerError {
    /// Errors implied by a set of layout flags.
    #[must_use]
    pub fn from_flags(flags: LayoutFlags) -> Vec<Self> {
        let mut out = Vec::new();
        if flags.contains(LayoutFlags::WIDTH_TOO_SMALL) {
            out.push(Self::WidthTooSmall);
        }
        if flags.contains(LayoutFlags::HEIGHT_TOO_SMALL) {
            out.push(Self::HeightTooSmall);
        }
        out
    }

    /// Whether a resize can clear this error.
    #[must_use]
    pub const fn is_layout(&self) -> bool {
        matches!(self, Self::WidthTooSmall | Self::HeightTooSmall)
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataInvalid(e) => write!(f, "data is not a valid hex string: {e}"),
            Self::WidthTooSmall => write!(f, "container too narrow to show any column"),
            Self::HeightTooSmall => write!(f, "container too short to show a row"),
            Self::Unsupported(feature) => write!(f, "{} is not supported here", feature.as_str()),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DataInvalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DataError> for ViewerError {
    fn from(e: DataError) -> Self {
        Self::DataInvalid(e)
    }
}

#![forbid(unsafe_code)]

//! Clipboard sinks.
//!
//! The viewer writes through a [`ClipboardSink`] and swallows its errors.
//!
//! | Sink | Use |
//! |------|-----|
//! | [`Osc52Clipboard`] | Terminal hosts: OSC 52 escape with base64 payload |
//! | [`MemoryClipboard`] | Tests and embedders that read the text back |
//! | [`UnavailableClipboard`] | No clipboard; the copy control is disabled |

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Clipboard write failure.
#[derive(Debug)]
pub enum ClipboardError {
    /// The sink has no clipboard behind it.
    Unavailable,
    /// Encoded payload exceeds what the terminal accepts.
    PayloadTooLarge { len: usize, max: usize },
    /// Writing the escape sequence failed.
    Io(io::Error),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard not available"),
            Self::PayloadTooLarge { len, max } => {
                write!(f, "clipboard payload of {len} bytes exceeds {max}")
            }
            Self::Io(e) => write!(f, "clipboard write failed: {e}"),
        }
    }
}

impl std::error::Error for ClipboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ClipboardError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Destination for copied text.
pub trait ClipboardSink {
    /// Whether writes can succeed at all.
    fn is_available(&self) -> bool {
        true
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Keeps the last written text. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written text.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_owned());
        Ok(())
    }
}

/// No clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl ClipboardSink for UnavailableClipboard {
    fn is_available(&self) -> bool {
        false
    }

    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// Writes OSC 52 "set clipboard" sequences to a terminal.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    writer: W,
    max_payload: usize,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Encoded payload limit most terminals accept.
    pub const DEFAULT_MAX_PAYLOAD: usize = 74_994;

    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            max_payload: Self::DEFAULT_MAX_PAYLOAD,
        }
    }

    #[must_use]
    pub fn with_max_payload(mut self, max: usize) -> Self {
        self.max_payload = max;
        self
    }

    /// The underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = STANDARD.encode(text.as_bytes());
        if encoded.len() > self.max_payload {
            return Err(ClipboardError::PayloadTooLarge {
                len: encoded.len(),
                max: self.max_payload,
            });
        }
        write!(self.writer, "\x1b]52;c;{encoded}\x07")?;
        self.writer.flush()?;
        Ok(())
    }
}

#![forbid(unsafe_code)]

//! Clipboard text for the current selection or cursor byte.

use hexview_core::bytes::{ByteBuffer, Placeholders};
use hexview_core::cursor::CursorState;
use hexview_core::event::Pane;
use hexview_core::selection::SelectRange;

/// Text to copy, or `None` when nothing is focused.
///
/// The selection wins over the cursor. The cursor pane picks the
/// representation: hex pairs separated by spaces, or decoded characters.
#[must_use]
pub fn copy_text(
    buffer: &ByteBuffer,
    cursor: &CursorState,
    selection: Option<SelectRange>,
    placeholders: &Placeholders,
) -> Option<String> {
    let (start, end) = match (selection, cursor.index) {
        (Some(range), _) => (range.start, range.end),
        (None, Some(index)) => (index, index),
        (None, None) => return None,
    };
    let codes = buffer.codes(start, end);
    let text = match cursor.pane {
        Pane::Hex => codes
            .map(|code| code.hex_pair().to_string())
            .collect::<Vec<_>>()
            .join(" "),
        Pane::Text => codes.map(|code| code.decoded_with(placeholders)).collect(),
    };
    (!text.is_empty()).then_some(text)
}

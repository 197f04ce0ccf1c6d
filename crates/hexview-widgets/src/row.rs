#![forbid(unsafe_code)]

//! Row materialization.
//!
//! Only rows inside the [`RenderWindow`] are built. Each row carries its
//! formatted offset and one [`CellView`] per byte for each shown pane; the
//! final row of a buffer may be shorter than `columns`.

use hexview_core::bytes::{ByteBuffer, ByteCode, Placeholders};
use hexview_core::event::Pane;
use hexview_layout::DisplayMode;

use crate::cell::{CellContext, CellView};
use crate::offset::OffsetFormat;
use crate::virtualized::RenderWindow;

/// Static options for row rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowOptions {
    pub offset: OffsetFormat,
    pub placeholders: Placeholders,
    pub display_mode: DisplayMode,
}

/// One materialized row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub row: usize,
    pub offset: String,
    pub hex: Vec<CellView>,
    pub text: Vec<CellView>,
    /// Whether the row is inside the viewport rather than the overscan.
    pub visible: bool,
}

impl RowView {
    /// Hex pane as one space-separated string.
    #[must_use]
    pub fn hex_line(&self) -> String {
        self.hex
            .iter()
            .map(CellView::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Text pane as one string.
    #[must_use]
    pub fn text_line(&self) -> String {
        self.text.iter().map(|c| c.glyphs[0]).collect()
    }
}

fn cell(code: ByteCode, pane: Pane, cx: &CellContext<'_>, placeholders: &Placeholders) -> CellView {
    let glyphs = match pane {
        Pane::Hex => code.hex_pair().chars(),
        Pane::Text => [code.decoded_with(placeholders), '\0'],
    };
    CellView {
        index: code.index,
        pane,
        glyphs,
        byte_class: code.class,
        class: cx.classify(code.index),
    }
}

/// Build the rows of `window`.
#[must_use]
pub fn render_rows(
    buffer: &ByteBuffer,
    window: &RenderWindow,
    cx: &CellContext<'_>,
    options: &RowOptions,
) -> Vec<RowView> {
    if window.columns == 0 {
        return Vec::new();
    }
    let columns = window.columns;
    window
        .rows
        .clone()
        .map(|row| {
            let start = row * columns;
            let codes = buffer.codes(start, start + columns - 1);
            let mut hex = Vec::new();
            let mut text = Vec::new();
            for code in codes {
                if options.display_mode.shows_hex() {
                    hex.push(cell(code, Pane::Hex, cx, &options.placeholders));
                }
                if options.display_mode.shows_text() {
                    text.push(cell(code, Pane::Text, cx, &options.placeholders));
                }
            }
            RowView {
                row,
                offset: options.offset.format(start),
                hex,
                text,
                visible: window.visible.contains(&row),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellClass;
    use crate::virtualized::ScrollState;
    use hexview_text::SearchState;

    fn buffer() -> ByteBuffer {
        ByteBuffer::from_bytes(b"Hello, world!\0\x01\xff".to_vec()).unwrap()
    }

    #[test]
    fn renders_only_the_window() {
        let buf = buffer();
        let mut scroll = ScrollState::new().with_overscan(0);
        scroll.set_bounds(buf.len(), 4, 2);
        scroll.scroll_to_row(1);
        let search = SearchState::default();
        let rows = render_rows(&buf, &scroll.window(), &CellContext::new(&search), &RowOptions::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].offset, "00000004");
        assert_eq!(rows[0].hex_line(), "6F 2C 20 77");
        assert_eq!(rows[0].text_line(), "o, w");
        assert!(rows.iter().all(|r| r.visible));
    }

    #[test]
    fn last_row_is_short_and_uses_placeholders() {
        let buf = buffer();
        let mut scroll = ScrollState::new();
        scroll.set_bounds(buf.len(), 6, 4);
        let search = SearchState::default();
        let rows = render_rows(&buf, &scroll.window(), &CellContext::new(&search), &RowOptions::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].hex.len(), 4);
        assert_eq!(rows[2].hex_line(), "21 00 01 FF");
        assert_eq!(rows[2].text_line(), "!0..");
    }

    #[test]
    fn display_mode_limits_panes() {
        let buf = buffer();
        let mut scroll = ScrollState::new();
        scroll.set_bounds(buf.len(), 16, 4);
        let search = SearchState::default();
        let options = RowOptions {
            display_mode: DisplayMode::Text,
            ..RowOptions::default()
        };
        let rows = render_rows(&buf, &scroll.window(), &CellContext::new(&search), &options);
        assert!(rows[0].hex.is_empty());
        assert_eq!(rows[0].text.len(), 16);
    }

    #[test]
    fn classes_flow_into_cells() {
        let buf = buffer();
        let mut scroll = ScrollState::new();
        scroll.set_bounds(buf.len(), 8, 4);
        let search = SearchState::default();
        let cx = CellContext {
            cursor: Some(1),
            ..CellContext::new(&search)
        };
        let rows = render_rows(&buf, &scroll.window(), &cx, &RowOptions::default());
        assert_eq!(rows[0].hex[1].class, CellClass::CURSOR);
        assert_eq!(rows[0].text[1].class, CellClass::CURSOR);
        assert_eq!(rows[0].text[1].text(), "e");
    }

    #[test]
    fn zero_columns_renders_nothing() {
        let buf = buffer();
        let search = SearchState::default();
        let rows = render_rows(&buf, &RenderWindow::default(), &CellContext::new(&search), &RowOptions::default());
        assert!(rows.is_empty());
    }
}

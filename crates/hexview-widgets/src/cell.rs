#![forbid(unsafe_code)]

//! Per-byte visual classification.
//!
//! A cell's look depends on four independent pieces of state: cursor, hover,
//! selection and search. [`CellContext`] borrows them once per frame and
//! answers [`CellContext::classify`] for each materialized index.

use bitflags::bitflags;
use hexview_core::bytes::ByteClass;
use hexview_core::event::Pane;
use hexview_core::selection::SelectRange;
use hexview_text::SearchState;

bitflags! {
    /// Visual state of one cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellClass: u8 {
        /// The focused byte.
        const CURSOR          = 0b0000_0001;
        /// Under the pointer.
        const HOVER           = 0b0000_0010;
        /// Inside the selected range.
        const SELECTED        = 0b0000_0100;
        /// Inside any search result.
        const SEARCH          = 0b0000_1000;
        /// Inside the currently selected search result.
        const SEARCH_SELECTED = 0b0001_0000;
    }
}

/// Read-only view over the slices that affect cell classes.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub cursor: Option<usize>,
    pub hover: Option<usize>,
    pub selection: Option<SelectRange>,
    pub search: &'a SearchState,
}

impl<'a> CellContext<'a> {
    #[must_use]
    pub const fn new(search: &'a SearchState) -> Self {
        Self {
            cursor: None,
            hover: None,
            selection: None,
            search,
        }
    }

    #[must_use]
    pub fn classify(&self, index: usize) -> CellClass {
        let mut class = CellClass::empty();
        class.set(CellClass::CURSOR, self.cursor == Some(index));
        class.set(CellClass::HOVER, self.hover == Some(index));
        class.set(
            CellClass::SELECTED,
            self.selection.is_some_and(|r| r.contains(index)),
        );
        if let Some(hit) = self.search.covering(index) {
            class |= CellClass::SEARCH;
            class.set(CellClass::SEARCH_SELECTED, self.search.selected() == Some(hit));
        }
        class
    }
}

/// One materialized byte cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub pane: Pane,
    /// Two hex digits, or one decoded char followed by `'\0'`.
    pub glyphs: [char; 2],
    pub byte_class: ByteClass,
    pub class: CellClass,
}

impl CellView {
    /// The cell's text.
    #[must_use]
    pub fn text(&self) -> String {
        match self.pane {
            Pane::Hex => self.glyphs.iter().collect(),
            Pane::Text => self.glyphs[0].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexview_text::SearchMode;

    #[test]
    fn empty_context_has_no_classes() {
        let search = SearchState::default();
        let cx = CellContext::new(&search);
        assert_eq!(cx.classify(3), CellClass::empty());
    }

    #[test]
    fn classes_combine() {
        let mut search = SearchState::new(SearchMode::text());
        search.set_query("l", b"Hello", None);
        let cx = CellContext {
            cursor: Some(2),
            hover: Some(3),
            selection: Some(SelectRange::new(1, 3)),
            search: &search,
        };
        assert_eq!(
            cx.classify(2),
            CellClass::CURSOR | CellClass::SELECTED | CellClass::SEARCH | CellClass::SEARCH_SELECTED
        );
        assert_eq!(
            cx.classify(3),
            CellClass::HOVER | CellClass::SELECTED | CellClass::SEARCH
        );
        assert_eq!(cx.classify(1), CellClass::SELECTED);
        assert_eq!(cx.classify(4), CellClass::empty());
    }
}

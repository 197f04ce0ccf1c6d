#![forbid(unsafe_code)]

//! Scroll slice.
//!
//! Registered last: besides explicit scroll actions it keeps the cursor in
//! view (default placement) and centers a newly selected search result.

use hexview_widgets::Placement;

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    match cx.action {
        Action::Load(_) => {
            store.scroll = store.config.scroll_state();
            sync_bounds(store);
        }
        Action::Resize(_) | Action::PointerUp => sync_bounds(store),
        _ => {}
    }

    let scroll = &mut store.scroll;
    match cx.action {
        Action::ScrollBy(delta) => {
            scroll.scroll_by(*delta);
        }
        Action::ScrollToRow(row) => {
            scroll.scroll_to_row(*row);
        }
        Action::ScrollToIndex { index, placement } => {
            scroll.scroll_to_index(*index, *placement);
        }
        Action::Wheel(notches) => {
            scroll.wheel(*notches);
        }
        Action::Page(pages) => {
            scroll.page(*pages);
        }
        Action::TouchStart { x, y } => scroll.touch_start(*x, *y),
        Action::TouchMove { x, y } => {
            scroll.touch_move(*x, *y, store.config.metrics.row_height);
        }
        Action::TouchEnd => scroll.touch_end(),
        _ => {}
    }

    if store.cursor.index != cx.before.cursor {
        if let Some(index) = store.cursor.index {
            store.scroll.scroll_to(index);
        }
    }
    let selected = store.search.selected_result();
    if selected != cx.before.selected_result {
        if let Some(result) = selected {
            store.scroll.scroll_to_index(result.index, Placement::IncludeMiddle);
        }
    }
    Cmd::None
}

fn sync_bounds(store: &mut Store) {
    let len = store.len();
    store
        .scroll
        .set_bounds(len, store.layout.columns, store.layout.rows);
}

#![forbid(unsafe_code)]

//! Cursor slice.
//!
//! Besides direct moves, a cursor-kind search parses its query as an offset
//! and jumps there.

use hexview_core::cursor::CursorState;
use hexview_text::{SearchKind, parse_offset};

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    let len = store.len();
    match cx.action {
        Action::Load(_) => store.cursor = CursorState::default(),
        Action::CellDown(target) => store.cursor.set_in(target.index, target.pane, len),
        Action::SetCursor(index) => store.cursor.set(*index, len),
        Action::MoveCursor {
            delta,
            extend: true,
        } => {
            // Extending continues from the range's moving end.
            if let Some(head) = store.select.head() {
                store.cursor.set(head, len);
            }
            store.cursor.move_by(*delta, len);
        }
        Action::MoveCursor { delta, .. } => store.cursor.move_by(*delta, len),
        Action::ClearCursor => store.cursor.clear(),
        Action::SetSearchQuery(query) if store.search.mode.kind == SearchKind::Cursor => {
            jump(store, query, len);
        }
        Action::SetSearchMode(mode) if mode.kind == SearchKind::Cursor => {
            let query = store.search.query().to_owned();
            jump(store, &query, len);
        }
        Action::RecallSearch {
            kind: SearchKind::Cursor,
            value,
        } => jump(store, value, len),
        Action::RestoreLocation(location) => match location.cursor {
            Some(index) => store.cursor.set(index, len),
            None => store.cursor.clear(),
        },
        _ => {}
    }
    Cmd::None
}

fn jump(store: &mut Store, query: &str, len: usize) {
    if let Some(offset) = parse_offset(query) {
        store.cursor.set(offset, len);
    }
}

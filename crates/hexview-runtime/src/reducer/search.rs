#![forbid(unsafe_code)]

//! Search slice.
//!
//! Rescans start from the cursor as it was before the action, so the
//! selected result is the first one after the cursor.

use hexview_core::bytes::ByteBuffer;

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    let origin = cx.before.cursor;
    let haystack = store
        .buffer
        .as_ref()
        .map(ByteBuffer::as_bytes)
        .unwrap_or_default();
    let search = &mut store.search;
    match cx.action {
        Action::Load(_) => search.rescan(haystack, None),
        Action::SetSearchQuery(query) => search.set_query(query.clone(), haystack, origin),
        Action::SetSearchMode(mode) => search.set_mode(*mode, haystack, origin),
        Action::SearchNext | Action::CommitSearch => search.next(),
        Action::SearchPrevious => search.previous(),
        Action::SelectResult(i) => search.select(*i),
        Action::ClearSearch => search.clear(),
        Action::RecallSearch { kind, value } => {
            search.mode.kind = *kind;
            search.set_query(value.clone(), haystack, origin);
        }
        Action::RestoreLocation(location) => {
            search.mode.kind = location.search_kind;
            search.set_query(location.query.clone(), haystack, location.cursor);
            if let Some(i) = location.selected_result {
                if i < search.results().len() {
                    search.select(i as i64);
                }
            }
        }
        _ => return Cmd::None,
    }
    tracing::trace!(
        results = search.results().len(),
        selected = ?search.selected(),
        "search updated"
    );
    Cmd::None
}

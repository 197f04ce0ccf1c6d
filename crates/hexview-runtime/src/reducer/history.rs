#![forbid(unsafe_code)]

//! Search history slice.

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    match cx.action {
        Action::CommitSearch => {
            let kind = store.search.mode.kind;
            let query = store.search.query().to_owned();
            store.history.push(kind, &query);
        }
        Action::HistoryStep(delta) => {
            return store.history.step(*delta).map_or(Cmd::None, |entry| {
                Cmd::msg(Action::RecallSearch {
                    kind: entry.kind,
                    value: entry.value.clone(),
                })
            });
        }
        Action::HistoryReset | Action::ClearSearch | Action::SetSearchQuery(_) => {
            store.history.reset();
        }
        _ => {}
    }
    Cmd::None
}

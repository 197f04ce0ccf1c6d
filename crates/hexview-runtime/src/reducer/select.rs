#![forbid(unsafe_code)]

//! Selection slice: pointer drags and keyboard extension.

use hexview_core::geometry::clamp_index;

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    let Some(last) = store.len().checked_sub(1) else {
        store.select.clear();
        return Cmd::None;
    };
    let select = &mut store.select;
    match cx.action {
        Action::Load(_) | Action::ClearSelection => select.clear(),
        Action::CellDown(target) => select.begin(target.index.min(last)),
        Action::CellHover(index) => {
            select.extend((*index).min(last));
        }
        Action::PointerUp => select.end(),
        Action::MoveCursor {
            delta,
            extend: true,
        } => {
            if let Some(from) = select.head().or(cx.before.cursor) {
                let to = clamp_index((from as i64).saturating_add(*delta), last);
                select.select_towards(from, to);
            }
        }
        Action::SetSelection { start, end } => select.set_range((*start).min(last), (*end).min(last)),
        Action::RestoreLocation(location) => match location.selection {
            Some((start, end)) => select.set_range(start.min(last), end.min(last)),
            None => select.clear(),
        },
        _ => {}
    }
    Cmd::None
}

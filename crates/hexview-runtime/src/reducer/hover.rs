#![forbid(unsafe_code)]

//! Hover slice.

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    match cx.action {
        Action::CellHover(index) => {
            store.hover.index = store.len().checked_sub(1).map(|last| (*index).min(last));
        }
        Action::PointerLeave | Action::Load(_) => store.hover.index = None,
        _ => {}
    }
    Cmd::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::test_util::{run, store};
    use hexview_core::geometry::Size;

    #[test]
    fn tracks_and_leaves() {
        let mut store = store("0011", Size::new(300, 72));
        run(&mut store, Action::CellHover(9));
        assert_eq!(store.hover.index, Some(1));
        run(&mut store, Action::PointerLeave);
        assert_eq!(store.hover.index, None);
    }
}

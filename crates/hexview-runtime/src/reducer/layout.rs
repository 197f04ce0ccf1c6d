#![forbid(unsafe_code)]

//! Grid dimensions, focus, display mode and fullscreen.

use hexview_core::geometry::Size;
use hexview_layout::Focus;

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::error::{Feature, ViewerError};
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    match cx.action {
        Action::Resize(size) if cx.before.dragging => {
            tracing::debug!(width = size.width, height = size.height, "resize deferred until drag ends");
            store.layout.deferred = Some(*size);
        }
        Action::Resize(size) => apply(store, *size),
        Action::PointerUp => {
            if let Some(size) = store.layout.deferred {
                apply(store, size);
            }
        }
        Action::CellDown(_) => store.layout.focus = Focus::Body,
        Action::ClickAway => store.layout.focus = Focus::None,
        Action::SetFocus(focus) => store.layout.focus = *focus,
        Action::SetDisplayMode(mode) => store.layout.display_mode = *mode,
        Action::ToggleFullscreen => {
            if store.config.capabilities.fullscreen {
                store.layout.fullscreen = !store.layout.fullscreen;
            } else {
                tracing::debug!(error = %ViewerError::Unsupported(Feature::Fullscreen), "ignored");
            }
        }
        _ => {}
    }
    Cmd::None
}

fn apply(store: &mut Store, size: Size) {
    let grid = store.config.layout_engine().compute(size);
    tracing::debug!(
        width = size.width,
        height = size.height,
        columns = grid.columns,
        rows = grid.rows,
        "layout computed"
    );
    store.layout.apply(size, grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Capabilities, ViewerConfig};
    use crate::reducer::test_util::{run, store};
    use hexview_core::event::CellTarget;
    use hexview_layout::{DisplayMode, LayoutFlags};

    #[test]
    fn resize_computes_grid() {
        let store = store("00", Size::new(3000, 180));
        assert_eq!(store.layout.columns, 80);
        assert_eq!(store.layout.rows, 10);
        assert!(store.layout.is_valid());
    }

    #[test]
    fn flags_reevaluated_on_resize() {
        let mut store = store("00", Size::new(100, 180));
        assert!(store.layout.flags.contains(LayoutFlags::WIDTH_TOO_SMALL));
        run(&mut store, Action::Resize(Size::new(300, 180)));
        assert!(store.layout.flags.is_empty());
    }

    #[test]
    fn resize_during_drag_is_deferred() {
        let mut store = store("00112233445566778899", Size::new(300, 180));
        run(&mut store, Action::CellDown(CellTarget::hex(1)));
        run(&mut store, Action::Resize(Size::new(600, 180)));
        assert_eq!(store.layout.columns, 8);
        assert_eq!(store.layout.deferred, Some(Size::new(600, 180)));
        run(&mut store, Action::PointerUp);
        assert_eq!(store.layout.columns, 16);
        assert_eq!(store.layout.deferred, None);
    }

    #[test]
    fn focus_follows_pointer() {
        let mut store = store("00", Size::new(300, 180));
        run(&mut store, Action::CellDown(CellTarget::text(0)));
        assert_eq!(store.layout.focus, Focus::Body);
        run(&mut store, Action::ClickAway);
        assert_eq!(store.layout.focus, Focus::None);
        run(&mut store, Action::SetFocus(Focus::Toolbar));
        assert_eq!(store.layout.focus, Focus::Toolbar);
    }

    #[test]
    fn display_mode_switch() {
        let mut store = store("00", Size::new(300, 180));
        run(&mut store, Action::SetDisplayMode(DisplayMode::Text));
        assert_eq!(store.layout.display_mode, DisplayMode::Text);
    }

    #[test]
    fn fullscreen_needs_capability() {
        let mut store = store("00", Size::new(300, 180));
        run(&mut store, Action::ToggleFullscreen);
        assert!(store.layout.fullscreen);

        let mut bare = Store::new(ViewerConfig::default().with_capabilities(Capabilities::none()));
        run(&mut bare, Action::ToggleFullscreen);
        assert!(!bare.layout.fullscreen);
    }
}

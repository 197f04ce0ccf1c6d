#![forbid(unsafe_code)]

//! Key bindings.
//!
//! | Focus   | Key                 | Actions                                 |
//! |---------|---------------------|-----------------------------------------|
//! | Body    | ←/→                 | cursor ∓1 (Shift: extend selection)     |
//! | Body    | ↑/↓                 | cursor ∓columns (Shift: extend)         |
//! | Body    | PageUp/PageDown     | cursor ∓one screen (Shift: extend)      |
//! | Body    | Home/End            | row start/end; Ctrl: buffer start/end   |
//! | Body    | Escape              | clear cursor and selection              |
//! | Body    | Ctrl+C              | copy                                    |
//! | Toolbar | Enter / Shift+Enter | commit and next / previous result       |
//! | Toolbar | Escape              | clear the search                        |
//! | Toolbar | ↑/↓                 | older / newer history entry             |

use smallvec::{SmallVec, smallvec};

use hexview_core::event::{KeyCode, KeyEvent};
use hexview_layout::Focus;

use crate::action::Action;
use crate::store::Store;

pub type Actions = SmallVec<[Action; 2]>;

/// Actions for `key` given the current focus and grid.
#[must_use]
pub fn actions(key: KeyEvent, store: &Store) -> Actions {
    match store.layout.focus {
        Focus::Body => body(key, store),
        Focus::Toolbar => toolbar(key),
        Focus::None => Actions::new(),
    }
}

fn body(key: KeyEvent, store: &Store) -> Actions {
    if key.ctrl() && key.is_char('c') {
        return smallvec![Action::Copy];
    }
    let columns = store.layout.columns.max(1) as i64;
    let page = (store.layout.page_size().max(1)) as i64;
    let column = store.cursor.index.map_or(0, |i| i as i64 % columns);
    let extend = key.shift();
    let delta = match key.code {
        KeyCode::Left => -1,
        KeyCode::Right => 1,
        KeyCode::Up => -columns,
        KeyCode::Down => columns,
        KeyCode::PageUp => -page,
        KeyCode::PageDown => page,
        KeyCode::Home if key.ctrl() => i64::MIN / 2,
        KeyCode::End if key.ctrl() => i64::MAX / 2,
        KeyCode::Home => -column,
        KeyCode::End => columns - 1 - column,
        KeyCode::Escape => return smallvec![Action::ClearCursor, Action::ClearSelection],
        _ => return Actions::new(),
    };
    smallvec![Action::MoveCursor { delta, extend }]
}

fn toolbar(key: KeyEvent) -> Actions {
    match key.code {
        KeyCode::Enter if key.shift() => smallvec![Action::SearchPrevious],
        KeyCode::Enter => smallvec![Action::CommitSearch],
        KeyCode::Escape => smallvec![Action::ClearSearch],
        KeyCode::Up => smallvec![Action::HistoryStep(1)],
        KeyCode::Down => smallvec![Action::HistoryStep(-1)],
        _ => Actions::new(),
    }
}

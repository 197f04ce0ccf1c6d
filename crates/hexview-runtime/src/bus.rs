#![forbid(unsafe_code)]

//! Dispatch table over [`Action`].
//!
//! Every registered reducer sees every action, in registration order, before
//! the next action is accepted. Reducers get the store plus a [`Dispatch`]
//! context carrying a [`Snapshot`] of the store taken before the first
//! reducer ran, so slice-to-slice reactions (cursor moved, result changed)
//! compare against the state the action started from.

use hexview_text::SearchResult;

use crate::action::{Action, Cmd};
use crate::reducer;
use crate::store::Store;

/// Values reducers compare against to detect cross-slice changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub cursor: Option<usize>,
    pub selected_result: Option<SearchResult>,
    pub dragging: bool,
}

impl Snapshot {
    #[must_use]
    pub fn of(store: &Store) -> Self {
        Self {
            cursor: store.cursor.index,
            selected_result: store.search.selected_result(),
            dragging: store.select.is_dragging(),
        }
    }
}

/// Context passed to each reducer.
#[derive(Debug, Clone, Copy)]
pub struct Dispatch<'a> {
    pub action: &'a Action,
    pub before: Snapshot,
}

/// A slice reducer.
pub type Reducer = fn(&mut Store, &Dispatch<'_>) -> Cmd;

#[derive(Debug, Clone, Default)]
pub struct DispatchBus {
    reducers: Vec<(&'static str, Reducer)>,
}

impl DispatchBus {
    /// A bus with no reducers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The viewer's reducer table.
    ///
    /// `scroll` runs last: it follows the cursor, the selected search result
    /// and the grid dimensions written by the earlier reducers.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .register("lifecycle", reducer::lifecycle::reduce)
            .register("layout", reducer::layout::reduce)
            .register("cursor", reducer::cursor::reduce)
            .register("select", reducer::select::reduce)
            .register("hover", reducer::hover::reduce)
            .register("search", reducer::search::reduce)
            .register("history", reducer::history::reduce)
            .register("share", reducer::share::reduce)
            .register("scroll", reducer::scroll::reduce)
    }

    #[must_use]
    pub fn register(mut self, name: &'static str, reducer: Reducer) -> Self {
        self.reducers.push((name, reducer));
        self
    }

    /// Registered reducer names, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reducers.iter().map(|(name, _)| *name)
    }

    /// Run every reducer on `action` and collect their commands.
    pub fn dispatch(&self, store: &mut Store, action: &Action) -> Cmd {
        let span = tracing::debug_span!("dispatch", action = action.name());
        let _guard = span.enter();

        let cx = Dispatch {
            action,
            before: Snapshot::of(store),
        };
        let cmds = self
            .reducers
            .iter()
            .map(|(name, reduce)| {
                let cmd = reduce(store, &cx);
                if !cmd.is_none() {
                    tracing::trace!(reducer = name, ?cmd, "reducer emitted command");
                }
                cmd
            })
            .collect();
        Cmd::batch(cmds)
    }
}

#![forbid(unsafe_code)]

//! [`HexViewer`]: the composition root.
//!
//! Owns the store, the dispatch bus, the two input throttles, the clipboard
//! sink and the signal hub. Hosts feed it data, sizes, events and clock
//! ticks, and read back rows, status and the location query.
//!
//! # Invariants
//!
//! 1. Every reducer sees an action before the next action is dispatched;
//!    follow-up actions ([`Cmd::Msg`]) run after the current one.
//! 2. Hover goes through the pointer throttle; wheel and touch-move through
//!    the scroll throttle. Pointer down/up/leave flush the pointer queue and
//!    touch start/end flush the scroll queue before dispatching. Keys,
//!    resizes and direct dispatches flush both.
//! 3. After [`HexViewer::unmount`] every entry point is a no-op.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Malformed data | Status `Error(DataInvalid)` until the next load |
//! | Container too small | Status `Error(WidthTooSmall/HeightTooSmall)`, no rows |
//! | Clipboard write fails | Logged at debug, nothing published |
//! | Feature unsupported | Control reported unavailable, action ignored |

use std::collections::VecDeque;
use std::time::Instant;

use hexview_core::event::{Event, MouseButton, PointerEvent, PointerKind, TouchEvent, TouchPhase};
use hexview_core::geometry::Size;
use hexview_core::selection::SelectRange;
use hexview_widgets::{RowOptions, RowView, render_rows};

use crate::action::{Action, Cmd};
use crate::bus::DispatchBus;
use crate::clipboard::{ClipboardSink, UnavailableClipboard};
use crate::config::ViewerConfig;
use crate::error::{Feature, ViewerError};
use crate::hub::{Hub, Message, Subscription, Topic};
use crate::keymap;
use crate::location::LocationState;
use crate::store::{Store, ViewerStatus};
use crate::throttle::Throttle;
use crate::traits::{Serializable, Validatable};

/// Which optional controls the host should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Controls {
    pub copy: bool,
    pub share: bool,
    pub fullscreen: bool,
}

/// Observable values compared around each dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    cursor: Option<usize>,
    selection: Option<SelectRange>,
    results: (usize, Option<usize>),
    status: ViewerStatus,
}

impl Observed {
    fn of(store: &Store) -> Self {
        Self {
            cursor: store.cursor.index,
            selection: store.select.range(),
            results: (store.search.results().len(), store.search.selected()),
            status: store.status(),
        }
    }
}

/// What a throttled replay can change.
fn fingerprint(store: &Store) -> (Option<usize>, Option<SelectRange>, usize) {
    (store.hover.index, store.select.range(), store.scroll.index())
}

/// Store, bus, clipboard and hub: everything a dispatch touches.
struct Core {
    store: Store,
    bus: DispatchBus,
    clipboard: Box<dyn ClipboardSink>,
    hub: Hub,
}

impl Core {
    fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            let before = Observed::of(&self.store);
            let cmd = self.bus.dispatch(&mut self.store, &action);
            self.run(cmd, &mut queue);
            self.publish_changes(&before);
        }
    }

    /// Replay a throttled batch; reports whether anything visible changed.
    fn commit(&mut self, batch: Vec<Action>) -> bool {
        let before = fingerprint(&self.store);
        for action in batch {
            self.dispatch(action);
        }
        fingerprint(&self.store) != before
    }

    fn run(&mut self, cmd: Cmd, queue: &mut VecDeque<Action>) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.run(cmd, queue);
                }
            }
            Cmd::Msg(action) => queue.push_back(action),
            Cmd::Copy(text) => {
                if self.write_clipboard(&text) {
                    self.hub.publish(Message::Copied(text));
                }
            }
            Cmd::Share(url) => {
                if self.write_clipboard(&url) {
                    self.hub.publish(Message::LocationShared(url));
                }
            }
        }
    }

    fn write_clipboard(&mut self, text: &str) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "clipboard write failed");
                false
            }
        }
    }

    fn publish_changes(&mut self, before: &Observed) {
        let after = Observed::of(&self.store);
        if after.cursor != before.cursor {
            self.hub.publish(Message::CursorMoved(after.cursor));
        }
        if after.selection != before.selection {
            self.hub.publish(Message::SelectionChanged(after.selection));
        }
        if after.results != before.results {
            let (count, selected) = after.results;
            self.hub.publish(Message::ResultsChanged { count, selected });
        }
        if after.status != before.status {
            tracing::debug!(status = ?after.status, "viewer status changed");
            self.hub.publish(Message::StatusChanged(after.status));
        }
    }
}

/// Interactive hex/text viewer.
pub struct HexViewer {
    core: Core,
    pointer: Throttle<Action>,
    scroll: Throttle<Action>,
    /// Host asked for a clipboard.
    wants_clipboard: bool,
    /// Location received before the data.
    pending_location: Option<LocationState>,
    mounted: bool,
}

impl Default for HexViewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl std::fmt::Debug for HexViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HexViewer")
            .field("status", &self.status())
            .field("len", &self.core.store.len())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl HexViewer {
    /// A viewer with no data and no clipboard.
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let delay = config.throttle_delay;
        let wants_clipboard = config.capabilities.clipboard;
        let mut store = Store::new(config);
        store.config.capabilities.clipboard = false;
        Self {
            core: Core {
                store,
                bus: DispatchBus::standard(),
                clipboard: Box::new(UnavailableClipboard),
                hub: Hub::new(),
            },
            pointer: Throttle::new(delay).with_merge(Action::merge),
            scroll: Throttle::new(delay).with_merge(Action::merge),
            wants_clipboard,
            pending_location: None,
            mounted: true,
        }
    }

    /// Write copies and share links to `sink`.
    #[must_use]
    pub fn with_clipboard(mut self, sink: impl ClipboardSink + 'static) -> Self {
        self.core.store.config.capabilities.clipboard = self.wants_clipboard && sink.is_available();
        self.core.clipboard = Box::new(sink);
        self
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.core.store
    }

    #[must_use]
    pub fn status(&self) -> ViewerStatus {
        self.core.store.status()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        let caps = self.core.store.config.capabilities;
        Controls {
            copy: caps.clipboard,
            share: caps.clipboard,
            fullscreen: caps.fullscreen,
        }
    }

    /// Features the host lacks, as errors for display next to the controls.
    #[must_use]
    pub fn unsupported(&self) -> Vec<ViewerError> {
        let caps = self.core.store.config.capabilities;
        let mut out = Vec::new();
        if !caps.clipboard {
            out.push(ViewerError::Unsupported(Feature::Clipboard));
        }
        if !caps.fullscreen {
            out.push(ViewerError::Unsupported(Feature::Fullscreen));
        }
        out
    }

    /// Replace the data with hex text. `None` or blank shows nothing.
    pub fn load(&mut self, data: Option<&str>) {
        self.dispatch(Action::Load(data.map(str::to_owned)));
        if self.core.store.buffer.is_some() {
            if let Some(location) = self.pending_location.take() {
                self.apply_location(location);
            }
        }
    }

    /// Report progress while the host is still fetching.
    pub fn set_loading(&mut self, message: Option<&str>, progress: u8) {
        self.dispatch(Action::SetLoading {
            message: message.map(str::to_owned),
            progress,
        });
    }

    pub fn resize(&mut self, size: Size) {
        self.dispatch(Action::Resize(size));
    }

    /// Run `action` through the reducers, after any queued throttled input.
    pub fn dispatch(&mut self, action: Action) {
        if !self.mounted {
            return;
        }
        self.flush_pointer();
        self.flush_scroll();
        self.core.dispatch(action);
    }

    /// Translate a host event into actions.
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        if !self.mounted {
            return;
        }
        match event {
            Event::Resize(size) => self.resize(size),
            Event::Key(key) => {
                for action in keymap::actions(key, &self.core.store) {
                    self.dispatch(action);
                }
            }
            Event::Pointer(pointer) => self.handle_pointer(pointer, now),
            Event::Wheel(wheel) => self.throttle_scroll(Action::Wheel(wheel.delta), now),
            Event::Touch(touch) => self.handle_touch(touch, now),
        }
    }

    fn handle_pointer(&mut self, pointer: PointerEvent, now: Instant) {
        match (pointer.kind, pointer.target) {
            (PointerKind::Down(MouseButton::Left), Some(target)) => {
                self.flush_pointer();
                self.core.dispatch(Action::CellDown(target));
            }
            (PointerKind::Down(_), None) => {
                self.flush_pointer();
                self.core.dispatch(Action::ClickAway);
            }
            (PointerKind::Down(_), Some(_)) => {}
            (PointerKind::Enter, Some(target)) => {
                if let Some(action) = self.pointer.push(Action::CellHover(target.index), now) {
                    self.core.dispatch(action);
                }
            }
            (PointerKind::Enter, None) => {}
            (PointerKind::Up(_), _) => {
                self.flush_pointer();
                self.core.dispatch(Action::PointerUp);
            }
            (PointerKind::Leave, _) => {
                self.flush_pointer();
                self.core.dispatch(Action::PointerLeave);
            }
        }
    }

    fn handle_touch(&mut self, touch: TouchEvent, now: Instant) {
        let TouchEvent { phase, x, y } = touch;
        match phase {
            TouchPhase::Start => {
                self.flush_scroll();
                self.core.dispatch(Action::TouchStart { x, y });
            }
            TouchPhase::Move => self.throttle_scroll(Action::TouchMove { x, y }, now),
            TouchPhase::End | TouchPhase::Cancel => {
                self.flush_scroll();
                self.core.dispatch(Action::TouchEnd);
            }
        }
    }

    fn throttle_scroll(&mut self, action: Action, now: Instant) {
        if let Some(action) = self.scroll.push(action, now) {
            self.core.dispatch(action);
        }
    }

    fn flush_pointer(&mut self) {
        for action in self.pointer.flush() {
            self.core.dispatch(action);
        }
    }

    fn flush_scroll(&mut self) {
        for action in self.scroll.flush() {
            self.core.dispatch(action);
        }
    }

    /// Replay throttled input whose deadline has passed.
    ///
    /// Returns whether anything was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let core = &mut self.core;
        let pointer = self.pointer.poll(now, |batch| {
            let count = batch.len();
            let changed = core.commit(batch);
            tracing::debug!(channel = "pointer", count, changed, "throttle commit");
            changed
        });
        let scroll = self.scroll.poll(now, |batch| {
            let count = batch.len();
            let changed = core.commit(batch);
            tracing::debug!(channel = "scroll", count, changed, "throttle commit");
            changed
        });
        pointer || scroll
    }

    /// When the host should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pointer.deadline(), self.scroll.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Rows of the current render window; empty unless the grid is active.
    #[must_use]
    pub fn rows(&self) -> Vec<RowView> {
        let store = &self.core.store;
        let Some(buffer) = &store.buffer else {
            return Vec::new();
        };
        if !store.status().is_active() {
            return Vec::new();
        }
        let options = RowOptions {
            offset: store.config.offset,
            placeholders: store.config.placeholders,
            display_mode: store.layout.display_mode,
        };
        render_rows(buffer, &store.scroll.window(), &store.cell_context(), &options)
    }

    /// Location state of the current view.
    #[must_use]
    pub fn location(&self) -> LocationState {
        LocationState::capture(&self.core.store)
    }

    /// The current view as a URL query (without `?`).
    #[must_use]
    pub fn location_query(&self) -> String {
        self.location().serialize()
    }

    #[must_use]
    pub fn share_url(&self, base: &str) -> String {
        self.location().share_url(base)
    }

    /// Apply a location query. Before data is loaded it is kept and applied
    /// after the next successful load.
    pub fn restore_location(&mut self, query: &str) {
        if !self.mounted {
            return;
        }
        let location = LocationState::deserialize(query);
        if self.core.store.buffer.is_some() {
            self.apply_location(location);
        } else {
            self.pending_location = Some(location);
        }
    }

    fn apply_location(&mut self, location: LocationState) {
        let location = location.validate(&self.core.store.len());
        self.dispatch(Action::RestoreLocation(location));
    }

    /// Listen to viewer signals; an empty slice means all topics.
    #[must_use]
    pub fn subscribe(&mut self, topics: &[Topic]) -> Subscription {
        self.core.hub.subscribe(topics)
    }

    /// Cancel pending input, drop subscribers and ignore further input.
    pub fn unmount(&mut self) {
        self.pointer.cancel();
        self.scroll.cancel();
        self.core.hub.clear();
        self.pending_location = None;
        self.mounted = false;
        tracing::debug!("viewer unmounted");
    }
}

#![forbid(unsafe_code)]

//! Runtime: store, dispatch bus, reducers and the [`HexViewer`] composition root.
//!
//! # Flow
//!
//! ```text
//! Event ──keymap/pointer──▶ Action ──▶ DispatchBus ──▶ reducers ──▶ Store
//!                              ▲                          │
//!                              └──────── Cmd::Msg ◀───────┤
//!                                        Cmd::Copy/Share ─┴──▶ ClipboardSink
//! ```
//!
//! High-frequency input (hover, wheel, touch-move) passes through a
//! [`Throttle`] before reaching the bus. After every dispatch the viewer
//! publishes typed [`Message`]s on its [`Hub`].

pub mod action;
pub mod bus;
pub mod clipboard;
pub mod config;
pub mod copy;
pub mod error;
pub mod history;
pub mod hub;
pub mod keymap;
pub mod location;
pub mod reducer;
pub mod store;
pub mod throttle;
pub mod traits;
pub mod viewer;

pub use action::{Action, Cmd};
pub use bus::{Dispatch, DispatchBus, Reducer, Snapshot};
pub use clipboard::{ClipboardError, ClipboardSink, MemoryClipboard, Osc52Clipboard, UnavailableClipboard};
pub use config::{Capabilities, ViewerConfig};
pub use error::{Feature, ViewerError};
pub use history::{HistoryEntry, SearchHistory};
pub use hub::{Hub, Message, Subscription, Topic};
pub use location::LocationState;
pub use store::{HoverState, Lifecycle, LoadStatus, Loading, Store, ViewerStatus};
pub use throttle::Throttle;
pub use traits::{Serializable, Validatable};
pub use viewer::{Controls, HexViewer};

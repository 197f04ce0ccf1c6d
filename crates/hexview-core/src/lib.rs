#![forbid(unsafe_code)]

//! Core: byte model, input events, cursor and selection state.

pub mod bytes;
pub mod cursor;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod selection;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

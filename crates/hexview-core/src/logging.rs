#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here
//! and at the crate root. Without it, the same names expand to nothing so call
//! sites compile unchanged and cost nothing.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for `tracing::Span` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. Returns a guard that does nothing on drop.
    #[must_use]
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

#[cfg(all(test, not(feature = "tracing")))]
mod tests {
    #[test]
    fn noop_macros_accept_fields_and_format_args() {
        let index = 7usize;
        crate::debug!(index, "cursor moved to {}", index);
        crate::warn!(reason = "odd length", "parse failed");
        let span = crate::debug_span!("dispatch", action = "set_cursor");
        let _guard = span.enter();
    }
}

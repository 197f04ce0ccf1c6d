#![forbid(unsafe_code)]

//! Tracing integration tests for the scroll controller.
//!
//! Events enabled:
//!   cargo test -p hexview-widgets --features tracing --test tracing_scroll
//!
//! Without the feature the same calls log nothing.

use std::sync::{Arc, Mutex};

use hexview_widgets::{ScrollState, TouchOutcome};

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

#[allow(dead_code)]
impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct Capture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields: visitor.0,
        });
    }
}

fn with_capture(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let capture = Capture::default();
    let events = Arc::clone(&capture.events);
    let subscriber = tracing_subscriber::registry().with(capture);
    tracing::subscriber::with_default(subscriber, f);
    let out = events.lock().unwrap().clone();
    out
}

fn reversing_swipe(scroll: &mut ScrollState) -> Vec<TouchOutcome> {
    scroll.touch_start(10, 200);
    [(10, 150), (10, 100), (10, 140), (10, 90)]
        .into_iter()
        .map(|(x, y)| scroll.touch_move(x, y, 18))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(feature = "tracing")]
#[test]
fn set_bounds_traces_dimensions() {
    let events = with_capture(|| {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(832, 8, 4);
    });
    let bounds: Vec<_> = events.iter().filter(|e| e.message == "scroll bounds").collect();
    assert_eq!(bounds.len(), 1);
    assert_eq!(bounds[0].level, tracing::Level::TRACE);
    assert_eq!(bounds[0].field("max_row_index"), Some("100"));
    assert_eq!(bounds[0].field("row_index"), Some("0"));
}

#[cfg(feature = "tracing")]
#[test]
fn touch_reversal_logged_once() {
    let mut outcomes = Vec::new();
    let events = with_capture(|| {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(832, 8, 4);
        outcomes = reversing_swipe(&mut scroll);
    });
    assert_eq!(outcomes[2], TouchOutcome::Native);
    assert_eq!(outcomes[3], TouchOutcome::Native);
    let handoffs: Vec<_> = events
        .iter()
        .filter(|e| e.message.starts_with("touch reversed"))
        .collect();
    assert_eq!(handoffs.len(), 1);
    assert_eq!(handoffs[0].level, tracing::Level::DEBUG);
    assert_eq!(handoffs[0].field("y"), Some("140"));
}

#[cfg(not(feature = "tracing"))]
#[test]
fn zero_overhead_without_feature() {
    let events = with_capture(|| {
        let mut scroll = ScrollState::new();
        scroll.set_bounds(832, 8, 4);
        let _ = reversing_swipe(&mut scroll);
    });
    assert!(events.is_empty());
}

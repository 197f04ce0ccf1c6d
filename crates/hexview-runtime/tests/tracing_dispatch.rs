#![forbid(unsafe_code)]

//! Tracing integration tests for the dispatch path.
//!
//! Every dispatch opens a `dispatch` span named after the action; data errors
//! are logged at WARN inside it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hexview_core::geometry::Size;
use hexview_runtime::{Action, HexViewer};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    span: Option<String>,
}

#[derive(Default)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn dispatched(&self) -> Vec<String> {
        self.spans()
            .into_iter()
            .filter(|s| s.name == "dispatch")
            .filter_map(|s| s.fields.get("action").cloned())
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .into_iter()
            .find(|(name, _)| name == "message")
            .map(|(_, value)| value)
            .unwrap_or_default();
        let span = ctx.event_span(event).map(|span| span.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            span,
        });
    }
}

fn with_capture(f: impl FnOnce()) -> CaptureHandle {
    let layer = Capture::default();
    let handle = CaptureHandle {
        spans: layer.spans.clone(),
        events: layer.events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn one_span_per_dispatch() {
    let handle = with_capture(|| {
        let mut viewer = HexViewer::default();
        viewer.load(Some("00112233"));
        viewer.resize(Size::new(300, 72));
        viewer.dispatch(Action::SetCursor(2));
    });
    assert_eq!(handle.dispatched(), ["load", "resize", "set_cursor"]);
}

#[test]
fn follow_up_actions_get_their_own_span() {
    let handle = with_capture(|| {
        let mut viewer = HexViewer::default();
        viewer.load(Some("48656c6c6f"));
        viewer.dispatch(Action::SetSearchQuery("ll".into()));
        viewer.dispatch(Action::CommitSearch);
        viewer.dispatch(Action::HistoryStep(1));
    });
    let dispatched = handle.dispatched();
    assert_eq!(
        &dispatched[dispatched.len() - 2..],
        ["history_step", "recall_search"]
    );
}

#[test]
fn malformed_data_warns_inside_dispatch() {
    let handle = with_capture(|| {
        let mut viewer = HexViewer::default();
        viewer.load(Some("4g"));
    });
    let warning = handle
        .events()
        .into_iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("a warning for malformed data");
    assert_eq!(warning.message, "rejecting malformed data");
    assert_eq!(warning.span.as_deref(), Some("dispatch"));
}

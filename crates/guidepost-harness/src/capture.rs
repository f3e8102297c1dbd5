#![forbid(unsafe_code)]

//! Tracing capture for asserting on log output.
//!
//! [`with_captured_tracing`] installs a recording layer as the thread-local
//! default subscriber for the duration of a closure and returns what it saw.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Level;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

/// A captured span creation.
#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: String,
    pub fields: HashMap<String, String>,
}

/// A captured event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: HashMap<String, String>,
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

/// Read access to what a capture recorded.
#[derive(Clone)]
pub struct CaptureHandle {
    inner: Arc<Mutex<Captured>>,
}

impl CaptureHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, Captured> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.lock().spans.clone()
    }

    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().events.clone()
    }

    /// Events at `level`, oldest first.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
        self.lock()
            .events
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Messages of `WARN` events, oldest first.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.events_at(Level::WARN)
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[must_use]
    pub fn span_count(&self, name: &str) -> usize {
        self.lock().spans.iter().filter(|s| s.name == name).count()
    }
}

impl fmt::Debug for CaptureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let captured = self.lock();
        f.debug_struct("CaptureHandle")
            .field("spans", &captured.spans.len())
            .field("events", &captured.events.len())
            .finish()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct CaptureLayer {
    inner: Arc<Mutex<Captured>>,
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        for field in attrs.metadata().fields() {
            fields.entry(field.name().to_string()).or_default();
        }
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .spans
            .push(CapturedSpan {
                name: attrs.metadata().name().to_string(),
                fields,
            });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .push(CapturedEvent {
                level: *event.metadata().level(),
                target: event.metadata().target().to_string(),
                message,
                fields,
            });
    }
}

/// Run `f` with a capturing subscriber installed on this thread.
pub fn with_captured_tracing<F, R>(f: F) -> (R, CaptureHandle)
where
    F: FnOnce() -> R,
{
    let inner = Arc::new(Mutex::new(Captured::default()));
    let layer = CaptureLayer {
        inner: Arc::clone(&inner),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, CaptureHandle { inner })
}

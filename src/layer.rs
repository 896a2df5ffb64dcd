use crate::attr::{Attr, Value};
use crate::handler::{Handler, ObserverHandler};
use crate::level::Level;
use crate::record::Record;
use chrono::Utc;
use tracing::field::{Field, Visit};
use tracing::{span, Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that turns `tracing` events into records and
/// passes them to a [`Handler`].
///
/// Span fields become context for every event inside the span, applied from
/// the root span to the leaf as if each span called `with_attrs` on its
/// parent's handler. With span groups enabled each span also opens a group
/// named after the span first, so `outer{a=1}:inner{b=2}: msg c=3` is
/// captured as `outer: {a: 1, inner: {b: 2, c: 3}}`.
///
/// Recording a span field again replaces its earlier value in place.
///
/// The `message` field becomes the record message; every other event field
/// is a call-site attribute.
#[derive(Debug, Clone)]
pub struct ObserverLayer<H = ObserverHandler> {
    handler: H,
    span_groups: bool,
}

impl<H: Handler> ObserverLayer<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            span_groups: false,
        }
    }

    /// Nest each span's fields under a group named after the span.
    pub fn with_span_groups(mut self, enabled: bool) -> Self {
        self.span_groups = enabled;
        self
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Fields recorded on a span, kept in its extensions.
struct SpanAttrs(Vec<Attr>);

impl<S, H> Layer<S> for ObserverLayer<H>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    H: Handler + 'static,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Vec::new();
        let mut message = None;
        attrs.record(&mut FieldVisitor {
            attrs: &mut fields,
            message: &mut message,
        });
        if let Some(message) = message {
            fields.push(Attr::string("message", message));
        }
        span.extensions_mut().insert(SpanAttrs(fields));
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        let Some(SpanAttrs(fields)) = extensions.get_mut::<SpanAttrs>() else {
            return;
        };
        let mut recorded = Vec::new();
        let mut message = None;
        values.record(&mut FieldVisitor {
            attrs: &mut recorded,
            message: &mut message,
        });
        if let Some(message) = message {
            recorded.push(Attr::string("message", message));
        }
        for attr in recorded {
            match fields.iter_mut().find(|a| a.key == attr.key) {
                Some(existing) => *existing = attr,
                None => fields.push(attr),
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let meta = event.metadata();
        let level = Level::from(*meta.level());
        if !self.handler.enabled(level) {
            return;
        }

        let mut attrs = Vec::new();
        let mut message: Option<String> = None;
        event.record(&mut FieldVisitor {
            attrs: &mut attrs,
            message: &mut message,
        });

        let mut handler = self.handler.clone();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if self.span_groups {
                    handler = handler.with_group(span.name());
                }
                if let Some(SpanAttrs(fields)) = span.extensions().get::<SpanAttrs>() {
                    handler = handler.with_attrs(fields.clone());
                }
            }
        }

        handler.handle(Record {
            timestamp: Some(Utc::now()),
            level,
            message: message.unwrap_or_default(),
            attrs,
        });
    }
}

/// Collects `tracing` field values as [`Attr`]s.
pub struct FieldVisitor<'a> {
    pub attrs: &'a mut Vec<Attr>,
    pub message: &'a mut Option<String>,
}

impl<'a> FieldVisitor<'a> {
    fn push(&mut self, field: &Field, value: Value) {
        self.attrs.push(Attr::new(field.name(), value));
    }
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.push(field, Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::Int64(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::Uint64(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::Float64(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.push(field, Value::String(format!("{:?}", value)));
        }
    }
}

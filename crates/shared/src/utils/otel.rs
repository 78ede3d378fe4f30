use opentelemetry::{
    Context, KeyValue,
    global::BoxedTracer,
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use tokio::time::Instant;
use tracing::{error, info};

/// A started operation span and the instant it began.
pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

impl TracingContext {
    pub fn start(tracer: &BoxedTracer, operation_name: &str, attributes: Vec<KeyValue>) -> Self {
        let start_time = Instant::now();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        Self {
            cx: Context::current_with_span(span),
            start_time,
        }
    }

    /// Records the outcome as a completion event and ends the span.
    pub fn complete(&self, is_success: bool, message: &str) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let elapsed = self.start_time.elapsed().as_secs_f64();

        self.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.cx.span().end();
    }
}

use opentelemetry::global;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::{logs::SdkLoggerProvider, trace::SdkTracerProvider};
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keeps the file writer flushing for as long as it is alive.
pub struct Logger {
    _guard: WorkerGuard,
    provider: Option<SdkLoggerProvider>,
    tracer_provider: Option<SdkTracerProvider>,
}

impl Logger {
    pub fn new(component: &str, is_dev: bool, log_dir: Option<&str>) -> Self {
        let default_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let log_dir = log_dir.unwrap_or(default_dir);
        let file_name = format!("user_service_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if is_dev {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            }
        });

        let console_layer = fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(true)
            .with_filter(console_filter);

        let registry = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        let provider = if is_dev {
            None
        } else {
            Some(SdkLoggerProvider::builder().build())
        };

        // Service spans go to the global tracer. In dev mode it stays the
        // no-op default.
        let tracer_provider = if is_dev {
            None
        } else {
            let tracer_provider = SdkTracerProvider::builder().build();
            global::set_tracer_provider(tracer_provider.clone());
            Some(tracer_provider)
        };

        if let Some(provider) = &provider {
            let otel_filter = EnvFilter::new("info")
                .add_directive("hyper=off".parse().expect("static directive"))
                .add_directive("opentelemetry=off".parse().expect("static directive"))
                .add_directive("h2=off".parse().expect("static directive"))
                .add_directive("sqlx=warn".parse().expect("static directive"));

            registry
                .with(OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter))
                .init();
        } else {
            registry.init();
        }

        Self {
            _guard: guard,
            provider,
            tracer_provider,
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            let _ = provider.shutdown();
        }
        if let Some(tracer_provider) = self.tracer_provider.take() {
            let _ = tracer_provider.shutdown();
        }
    }
}

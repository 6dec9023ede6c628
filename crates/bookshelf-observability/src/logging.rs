use std::sync::OnceLock;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::{default_filter, init_basic_console_logging};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// `OBSERVABILITY_ENABLED` is on unless set to `false` or `0`.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(request_id = %request_id, method = %method, path = %path, "Incoming request");

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id, method = %method, path = %path,
            status, latency_ms, "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id, method = %method, path = %path,
            status, latency_ms, "Server error"
        ),
        _ => info!(
            request_id = %request_id, method = %method, path = %path,
            status, latency_ms, "Request completed"
        ),
    }

    response
}

fn init_tracer(endpoint: String) -> Result<Tracer, TraceError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, "bookshelf"),
        KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        KeyValue::new(
            "environment",
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        ),
    ]);

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)
}

/// Installs the global subscriber.
///
/// Layers:
/// - console, filtered by `RUST_LOG` or `LOG_LEVEL`
/// - daily-rolling JSON file `bookshelf.json` in `LOG_DIR` (default `storage/logs`)
/// - error-only plain file `bookshelf.log` in the same directory
/// - OpenTelemetry export, only when `OTEL_EXPORTER_OTLP_ENDPOINT` is set
///
/// Falls back to console logging when `OBSERVABILITY_ENABLED=false`.
///
/// # Errors
///
/// Fails when the log directory cannot be created or a subscriber is already
/// installed.
pub fn init_tracing() -> anyhow::Result<()> {
    if !is_observability_enabled() {
        return init_basic_console_logging();
    }

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string());
    std::fs::create_dir_all(&log_dir)?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(default_filter());

    let error_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "bookshelf.log");
    let error_layer = fmt::layer()
        .with_writer(error_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "bookshelf.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    let mut otel_error = None;
    let otel_layer = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(endpoint) if !endpoint.trim().is_empty() => match init_tracer(endpoint) {
            Ok(tracer) => Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Err(e) => {
                otel_error = Some(e);
                None
            }
        },
        _ => None,
    };
    let otel_installed = otel_layer.is_some();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(error_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()?;

    if let Some(e) = otel_error {
        warn!(error = %e, "Failed to initialize OpenTelemetry, continuing without it");
    }
    info!(log_dir = %log_dir, otel = otel_installed, "Tracing initialized");
    Ok(())
}

pub async fn shutdown_tracer() {
    info!("Shutting down OpenTelemetry tracer");
    global::shutdown_tracer_provider();
}

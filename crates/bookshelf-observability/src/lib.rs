//! # Bookshelf Observability
//!
//! Logging, distributed tracing and Prometheus metrics for the Bookshelf API.
//!
//! Compiled in with the `observability` feature (on by default). At runtime the
//! `OBSERVABILITY_ENABLED` environment variable can switch it off, in which
//! case only console logging is installed and the counters are not recorded.
//!
//! Without the feature the same functions exist as no-ops, so callers never
//! need `cfg` attributes of their own.
//!
//! # Example
//!
//! ```no_run
//! use bookshelf_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_account_created,
    track_authorization_denied, track_login_failure, track_login_success,
    track_request_authentication, track_saved_book_change, track_token_issued,
};

#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    /// Console logging only.
    pub fn init_tracing() -> anyhow::Result<()> {
        crate::basic_logging::init_basic_console_logging()
    }

    pub async fn shutdown_tracer() {}

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn metrics_app(_handle: ()) -> Router {
        Router::new()
    }

    pub fn track_account_created() {}
    pub fn track_login_success() {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_issued() {}
    pub fn track_request_authentication(_outcome: &str) {}
    pub fn track_authorization_denied(_reason: &str) {}
    pub fn track_saved_book_change(_operation: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;

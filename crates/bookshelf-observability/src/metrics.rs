use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::warn;

use crate::logging::is_observability_enabled;

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when observability is switched off or a recorder is already
/// installed. Must be called from within a Tokio runtime.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = match PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .and_then(|builder| builder.install_recorder())
    {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Prometheus recorder not installed");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Serves the Prometheus scrape endpoint at `/metrics`.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_account_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("accounts_created_total").increment(1);
}

pub fn track_login_success() {
    if !is_observability_enabled() {
        return;
    }
    counter!("logins_total", "status" => "success", "reason" => "none").increment(1);
}

pub fn track_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("logins_total", "status" => "failure", "reason" => reason.to_string()).increment(1);
}

pub fn track_token_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("tokens_issued_total").increment(1);
}

/// `outcome` is `authenticated` or the reason the request stayed anonymous.
pub fn track_request_authentication(outcome: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("request_authentications_total", "outcome" => outcome.to_string()).increment(1);
}

pub fn track_authorization_denied(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("authorization_denials_total", "reason" => reason.to_string()).increment(1);
}

pub fn track_saved_book_change(operation: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("saved_book_changes_total", "operation" => operation.to_string()).increment(1);
}

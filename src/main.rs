use std::net::SocketAddr;

use bookshelf::router::init_router;
use bookshelf::state::init_app_state;
use bookshelf_observability::{init_metrics, init_tracing, metrics_app, shutdown_tracer};
use dotenvy::dotenv;
use tracing::info;

const DEFAULT_PORT: u16 = 3001;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let state = init_app_state().await?;
    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!(port, "Server running on http://localhost:{}", port);
    info!("Swagger UI available at http://localhost:{}/swagger-ui", port);
    info!("Scalar UI available at http://localhost:{}/scalar", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    shutdown_tracer().await;
    Ok(())
}

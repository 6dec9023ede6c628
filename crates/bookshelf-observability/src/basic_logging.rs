use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging, used when observability is compiled out or switched
/// off with `OBSERVABILITY_ENABLED=false`.
///
/// `RUST_LOG` wins when set. Otherwise `LOG_LEVEL` (default `info`) applies
/// to the bookshelf crates and noisy dependencies are held at `warn`.
pub fn init_basic_console_logging() -> anyhow::Result<()> {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(default_filter());

    tracing_subscriber::registry().with(console_layer).try_init()?;

    eprintln!("Observability disabled, console logging only");
    Ok(())
}

pub(crate) fn default_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bookshelf={log_level},tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn"
        ))
    })
}

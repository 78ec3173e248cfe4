use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` from the process or `.env`, else `log_level`.
///
/// Loads `.env` itself because tracing is installed before any configuration is read.
pub fn env_filter(log_level: &str) -> EnvFilter {
    dotenvy::dotenv().ok();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Install the global subscriber: `RUST_LOG` filter (or `log_level`) and JSON output.
pub fn init_tracing(service_name: &str, log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .init();

    tracing::info!(service = service_name, "Tracing initialized");
}

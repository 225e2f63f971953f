//! foldview server: permission-filtered folder tree rendering over HTTP.
//!
//! Loads configuration, initializes logging, and starts the API server.

use tracing_subscriber::{EnvFilter, fmt};

use foldview_core::config::AppConfig;
use foldview_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        strategy = %config.tree.default_strategy,
        fixture = %config.store.fixture_path,
        "Starting foldview"
    );

    if let Err(e) = foldview_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `FOLDVIEW_ENV` overlay, and
/// `FOLDVIEW__*` environment overrides, then validate.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FOLDVIEW_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

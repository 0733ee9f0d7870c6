//! TokenGate Server: token-based authentication and authorization gateway.
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use tokengate_core::config::{AppConfig, LogFormat};
use tokengate_core::error::AppError;

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

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `TOKENGATE__*` environment variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TOKENGATE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        rate_limiting = config.rate_limit.enabled,
        "Starting TokenGate"
    );

    if config.auth.uses_placeholder_secret() {
        tracing::warn!(
            "auth.jwt_secret is the shipped placeholder; set TOKENGATE__AUTH__JWT_SECRET before exposing this server"
        );
    }

    tokengate_api::run_server(config).await
}

//! `dropln-server`: serves the Dropln file tree over HTTP.
//!
//! Configuration comes from `DROPLN_CONFIG` (default `config/default.toml`),
//! the `config/{DROPLN_ENV}.toml` overlay and `DROPLN__*` variables.

use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use dropln_core::config::{AppConfig, LogFormat, LoggingConfig};
use dropln_core::error::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path =
        std::env::var("DROPLN_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("DROPLN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load_from(&config_path, &env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dropln-server: cannot load {config_path} ({env}): {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        env = %env,
        "Starting dropln-server"
    );

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dropln-server exited with an error");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().with_current_span(false).init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.bind_address();

    let state = dropln_api::build_state(config).await?;
    let app = dropln_api::build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Cannot listen on {addr}: {e}")))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server failed: {e}")))?;

    tracing::info!("dropln-server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown requested, draining connections");
}

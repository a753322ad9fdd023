//! # andromeda-server
//!
//! HTTP server for the andromeda Jalali calendar converter.
//!
//! This binary provides:
//! - REST API for timestamp conversion, formatting, parsing and day arithmetic
//! - OpenAPI document at `/api/openapi.json`
//! - Structured logging to file and stdout
//!
//! ## Running
//!
//! ```bash
//! # Development
//! cargo run --package andromeda-server
//!
//! # Another port, JSON logs
//! ANDROMEDA__SERVER__PORT=8080 ANDROMEDA__LOGGING__PRODUCTION=true ./andromeda-server
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use andromeda_core::Config;
use andromeda_server::api::create_router;
use andromeda_server::logging;
use andromeda_server::state::AppState;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    logging::init(&config.logging)?;

    info!(
        config_path = %Config::config_path().display(),
        strict = config.validation.strict,
        "Starting andromeda-server"
    );

    let addr = config.bind_addr();
    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

//! Configuration API endpoint.
//!
//! Exposes the effective configuration (file, environment overrides and
//! defaults merged) so clients can discover the default patterns.

use andromeda_core::Config;
use axum::extract::State;
use axum::Json;

use crate::state::SharedState;

/// Get the effective configuration.
#[utoipa::path(
    get,
    path = "/api/config",
    tag = "config",
    operation_id = "getConfig",
    summary = "Get effective configuration",
    description = "Returns the configuration the server is running with, after \
        merging the TOML file, ANDROMEDA__ environment overrides and defaults.",
    responses(
        (status = 200, description = "Configuration retrieved", body = Config)
    )
)]
pub async fn get_config(State(state): State<SharedState>) -> Json<Config> {
    Json(state.config.clone())
}

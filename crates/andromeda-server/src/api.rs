//! HTTP API routes and handlers.
//!
//! This module contains all HTTP endpoint implementations organized by domain:
//! - `calendar` - Jalali conversion, formatting, parsing and day arithmetic
//! - `config` - Effective configuration
//! - `health` - Service health checks
//! - `error` - API error types
//! - `openapi` - OpenAPI specification generation

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub mod calendar;
pub mod config;
pub mod error;
pub mod health;
pub mod openapi;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};

// Re-export OpenAPI utilities for the gen-openapi binary
pub use openapi::get_openapi_json;

/// Creates the combined API router with all endpoints.
///
/// # Route Structure
///
/// ```text
/// /health                        - Health check
/// /api
/// ├── /now                       - Current Jalali date-time
/// ├── /convert/from-timestamp    - Unix milliseconds to Jalali
/// ├── /convert/to-timestamp      - Jalali to Unix milliseconds
/// ├── /format                    - Pattern formatting
/// ├── /format-timestamp          - Optional timestamp, placeholder when absent
/// ├── /parse                     - Pattern parsing
/// ├── /days-between              - Calendar-day difference
/// ├── /add-days                  - Calendar-day offset
/// ├── /dst                       - Daylight saving status
/// ├── /config                    - Effective configuration
/// └── /openapi.json              - OpenAPI specification
/// ```
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(health::router())
        .nest(
            "/api",
            calendar::router()
                // Configuration at /api/config
                .route("/config", get(config::get_config))
                // OpenAPI spec at /api/openapi.json
                .route("/openapi.json", get(openapi::get_openapi_spec)),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

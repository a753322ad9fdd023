//! OpenAPI specification generation for the andromeda API.
//!
//! The document is served at `/api/openapi.json` and written to the
//! workspace root by the `gen-openapi` binary for client generation.

use andromeda_core::{
    Config, FormatConfig, IranOffset, LoggingConfig, PersianDateTime, ServerConfig,
    ValidationConfig,
};
use axum::Json;
use utoipa::OpenApi;

use super::calendar::{
    AddDaysRequest, DateResponse, DaysBetweenRequest, DaysBetweenResponse, DstResponse,
    FormatRequest, FormatResponse, FormatTimestampRequest, FromTimestampRequest, ParseRequest,
    TimestampResponse,
};
use super::error::ErrorResponse;
use super::health::HealthResponse;

/// Serve the OpenAPI specification as JSON.
pub async fn get_openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Returns the OpenAPI specification as a pretty-printed string.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn get_openapi_json() -> serde_json::Result<String> {
    ApiDoc::openapi().to_pretty_json()
}

/// Main OpenAPI document structure for andromeda.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "andromeda API",
        version = "0.1.0",
        description = r#"
# andromeda API

Jalali (Persian, solar Hijri) calendar conversion in Iran local time.

## Overview

1. **Conversion**: Unix milliseconds to Jalali components and back
2. **Formatting**: `yyyy`, `MM`, `dd`, `HH`, `mm`, `ss` token patterns, and parsing with the same patterns
3. **Arithmetic**: calendar-day differences and offsets

## Time zone

All Jalali components are Iran local time. Standard time is UTC+03:30.
Before 1402, daylight saving time (UTC+04:30) applied from 2 Farvardin
through the end of Shahrivar.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local andromeda server")
    ),
    tags(
        (
            name = "system",
            description = "Health checks"
        ),
        (
            name = "calendar",
            description = "Jalali conversion, formatting, parsing and arithmetic"
        ),
        (
            name = "config",
            description = "Effective server configuration"
        )
    ),
    paths(
        // Health endpoints
        super::health::health_check,
        // Calendar endpoints
        super::calendar::get_now,
        super::calendar::convert_from_timestamp,
        super::calendar::convert_to_timestamp,
        super::calendar::format_date,
        super::calendar::format_timestamp,
        super::calendar::parse_date,
        super::calendar::days_between,
        super::calendar::add_days,
        super::calendar::get_dst,
        // Config endpoints
        super::config::get_config,
    ),
    components(
        schemas(
            // Error types
            ErrorResponse,
            // Health types
            HealthResponse,
            // Calendar types
            PersianDateTime,
            IranOffset,
            DateResponse,
            FromTimestampRequest,
            TimestampResponse,
            FormatRequest,
            FormatResponse,
            FormatTimestampRequest,
            ParseRequest,
            DaysBetweenRequest,
            DaysBetweenResponse,
            AddDaysRequest,
            DstResponse,
            // Config types
            Config,
            FormatConfig,
            ValidationConfig,
            ServerConfig,
            LoggingConfig,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generation() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "andromeda API");
        assert!(spec.paths.paths.contains_key("/api/convert/from-timestamp"));
        assert!(spec.paths.paths.contains_key("/api/format-timestamp"));
        assert!(spec.paths.paths.contains_key("/health"));
    }

    #[test]
    fn test_openapi_json_serialization() {
        let json = get_openapi_json().unwrap();
        assert!(json.contains("\"openapi\":"));
        assert!(json.contains("\"andromeda API\""));
        assert!(json.contains("PersianDateTime"));
    }
}

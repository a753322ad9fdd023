//! Calendar conversion API endpoints.
//!
//! Every endpoint is a thin wrapper over `andromeda_core`. Dates travel as
//! `PersianDateTime` objects (Jalali components in Iran local time) and
//! instants as Unix milliseconds.

use andromeda_core::{IranOffset, PersianDateTime};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// Creates the calendar router with all endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/now", get(get_now))
        .route("/convert/from-timestamp", post(convert_from_timestamp))
        .route("/convert/to-timestamp", post(convert_to_timestamp))
        .route("/format", post(format_date))
        .route("/format-timestamp", post(format_timestamp))
        .route("/parse", post(parse_date))
        .route("/days-between", post(days_between))
        .route("/add-days", post(add_days))
        .route("/dst", get(get_dst))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the current-time endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NowQuery {
    /// Output pattern. Defaults to the configured date-time pattern.
    #[param(example = "yyyy/MM/dd HH:mm")]
    pub pattern: Option<String>,
}

/// A resolved instant with its Jalali reading.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "timestamp_ms": 1_700_000_000_000_i64,
    "date": {
        "year": 1402, "month": 8, "day": 24,
        "hour": 1, "minute": 43, "second": 20, "millisecond": 0
    },
    "formatted": "1402/08/24 01:43:20",
    "offset": "standard"
}))]
pub struct DateResponse {
    /// Unix milliseconds (UTC).
    #[schema(example = 1_700_000_000_000_i64)]
    pub timestamp_ms: i64,

    /// Jalali components in Iran local time.
    pub date: PersianDateTime,

    /// `date` rendered with the requested or configured pattern.
    #[schema(example = "1402/08/24 01:43:20")]
    pub formatted: String,

    /// Iran offset in effect at the instant.
    pub offset: IranOffset,
}

/// Request body for converting a timestamp.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "timestamp_ms": 1_700_000_000_000_i64,
    "pattern": "yyyy/MM/dd"
}))]
pub struct FromTimestampRequest {
    /// Unix milliseconds (UTC).
    #[schema(example = 1_700_000_000_000_i64)]
    pub timestamp_ms: i64,

    /// Output pattern. Defaults to the configured date-time pattern.
    #[schema(example = "yyyy/MM/dd")]
    pub pattern: Option<String>,
}

/// Response for converting a date to a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "timestamp_ms": 1_700_000_000_000_i64,
    "utc": "2023-11-14T22:13:20+00:00"
}))]
pub struct TimestampResponse {
    /// Unix milliseconds (UTC).
    #[schema(example = 1_700_000_000_000_i64)]
    pub timestamp_ms: i64,

    /// The same instant as RFC 3339 UTC.
    #[schema(example = "2023-11-14T22:13:20+00:00")]
    pub utc: String,
}

/// Request body for formatting a date.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "date": { "year": 1404, "month": 1, "day": 1 },
    "pattern": "dd/MM/yyyy"
}))]
pub struct FormatRequest {
    /// Date to format.
    pub date: PersianDateTime,

    /// Pattern using the tokens `yyyy`, `MM`, `dd`, `HH`, `mm`, `ss`.
    #[schema(example = "dd/MM/yyyy")]
    pub pattern: String,
}

/// Formatted text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "formatted": "01/01/1404" }))]
pub struct FormatResponse {
    /// The rendered pattern.
    #[schema(example = "01/01/1404")]
    pub formatted: String,
}

/// Request body for formatting an optional timestamp.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "timestamp_ms": 1_700_000_000_000_i64,
    "pattern": "yyyy/MM/dd"
}))]
pub struct FormatTimestampRequest {
    /// Unix milliseconds (UTC). When absent the configured placeholder is
    /// rendered instead.
    #[schema(example = 1_700_000_000_000_i64, nullable)]
    pub timestamp_ms: Option<i64>,

    /// Output pattern. Defaults to the configured date-time pattern.
    #[schema(example = "yyyy/MM/dd")]
    pub pattern: Option<String>,
}

/// Request body for parsing text.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "input": "1404/01/01 10:00:48",
    "pattern": "yyyy/MM/dd HH:mm:ss"
}))]
pub struct ParseRequest {
    /// Text to parse.
    #[schema(example = "1404/01/01 10:00:48")]
    pub input: String,

    /// Pattern the text was produced with. When omitted, the configured
    /// date-time pattern is tried, then the configured date pattern.
    #[schema(example = "yyyy/MM/dd HH:mm:ss")]
    pub pattern: Option<String>,
}

/// Request body for the distance between two dates.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "from": { "year": 1404, "month": 1, "day": 1 },
    "to": { "year": 1404, "month": 2, "day": 1 }
}))]
pub struct DaysBetweenRequest {
    /// Start date.
    pub from: PersianDateTime,
    /// End date.
    pub to: PersianDateTime,
}

/// Whole calendar days between two dates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "days": 31 }))]
pub struct DaysBetweenResponse {
    /// Negative when `to` is before `from`.
    #[schema(example = 31)]
    pub days: i64,
}

/// Request body for moving a date by whole days.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "date": { "year": 1404, "month": 6, "day": 31, "hour": 8 },
    "days": 1
}))]
pub struct AddDaysRequest {
    /// Starting date; its time of day is kept.
    pub date: PersianDateTime,
    /// Days to add, negative to subtract.
    #[schema(example = 1)]
    pub days: i64,
}

/// Query parameters for the daylight saving endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DstQuery {
    /// Unix milliseconds (UTC).
    #[param(example = 1_650_007_200_000_i64)]
    pub timestamp_ms: i64,
}

/// Daylight saving status at an instant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "timestamp_ms": 1_650_007_200_000_i64,
    "is_daylight_saving": true,
    "offset": "daylight",
    "utc_offset": "+04:30",
    "abbreviation": "IRDT"
}))]
pub struct DstResponse {
    /// The instant that was checked.
    #[schema(example = 1_650_007_200_000_i64)]
    pub timestamp_ms: i64,

    /// Whether Iran daylight saving time applies.
    #[schema(example = true)]
    pub is_daylight_saving: bool,

    /// Offset kind.
    pub offset: IranOffset,

    /// Offset from UTC as `+HH:MM`.
    #[schema(example = "+04:30")]
    pub utc_offset: String,

    /// `IRST` or `IRDT`.
    #[schema(example = "IRDT")]
    pub abbreviation: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Get the current instant in the Jalali calendar.
#[utoipa::path(
    get,
    path = "/api/now",
    tag = "calendar",
    operation_id = "getNow",
    summary = "Current Jalali date-time",
    description = "Returns the current instant in Iran local time, formatted \
        with the given pattern or the configured date-time pattern.",
    params(NowQuery),
    responses(
        (status = 200, description = "Current date-time", body = DateResponse)
    )
)]
pub async fn get_now(
    State(state): State<SharedState>,
    Query(query): Query<NowQuery>,
) -> ApiResult<Json<DateResponse>> {
    let timestamp_ms = state.clock.now_millis();
    let pattern = query
        .pattern
        .as_deref()
        .unwrap_or(&state.config.format.date_time_pattern);
    Ok(Json(describe_instant(timestamp_ms, pattern)?))
}

/// Convert a Unix timestamp to a Jalali date-time.
#[utoipa::path(
    post,
    path = "/api/convert/from-timestamp",
    tag = "calendar",
    operation_id = "convertFromTimestamp",
    summary = "Timestamp to Jalali",
    description = "Converts Unix milliseconds to Jalali components in Iran local \
        time, applying daylight saving for years before 1402.",
    request_body = FromTimestampRequest,
    responses(
        (status = 200, description = "Converted", body = DateResponse),
        (status = 422, description = "Timestamp outside the supported range", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn convert_from_timestamp(
    State(state): State<SharedState>,
    Json(request): Json<FromTimestampRequest>,
) -> ApiResult<Json<DateResponse>> {
    let pattern = request
        .pattern
        .as_deref()
        .unwrap_or(&state.config.format.date_time_pattern);
    Ok(Json(describe_instant(request.timestamp_ms, pattern)?))
}

/// Convert a Jalali date-time to a Unix timestamp.
#[utoipa::path(
    post,
    path = "/api/convert/to-timestamp",
    tag = "calendar",
    operation_id = "convertToTimestamp",
    summary = "Jalali to timestamp",
    description = "Converts Jalali components in Iran local time to Unix \
        milliseconds. During the repeated hour at the end of a daylight saving \
        period the later (standard time) instant is returned. With strict \
        validation enabled, out-of-range components are rejected.",
    request_body = PersianDateTime,
    responses(
        (status = 200, description = "Converted", body = TimestampResponse),
        (status = 400, description = "Invalid components", body = crate::api::error::ErrorResponse),
        (status = 422, description = "Date outside the supported range", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn convert_to_timestamp(
    State(state): State<SharedState>,
    Json(date): Json<PersianDateTime>,
) -> ApiResult<Json<TimestampResponse>> {
    check_components(&state, &date)?;
    let timestamp_ms = date.to_timestamp()?;
    let utc = date.to_datetime()?.to_rfc3339();
    Ok(Json(TimestampResponse { timestamp_ms, utc }))
}

/// Format a Jalali date-time with a pattern.
#[utoipa::path(
    post,
    path = "/api/format",
    tag = "calendar",
    operation_id = "formatDate",
    summary = "Format a date",
    description = "Replaces yyyy, MM, dd, HH, mm and ss in the pattern with the \
        zero-padded components. Other characters are kept as-is.",
    request_body = FormatRequest,
    responses(
        (status = 200, description = "Formatted", body = FormatResponse),
        (status = 400, description = "Invalid components", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn format_date(
    State(state): State<SharedState>,
    Json(request): Json<FormatRequest>,
) -> ApiResult<Json<FormatResponse>> {
    check_components(&state, &request.date)?;
    Ok(Json(FormatResponse {
        formatted: request.date.format(&request.pattern),
    }))
}

/// Format a timestamp that may be missing.
#[utoipa::path(
    post,
    path = "/api/format-timestamp",
    tag = "calendar",
    operation_id = "formatTimestamp",
    summary = "Format an optional timestamp",
    description = "Formats Unix milliseconds with the given or configured \
        date-time pattern. Without a timestamp the configured placeholder is \
        returned: the date placeholder for the configured date pattern, the \
        date-time placeholder otherwise.",
    request_body = FormatTimestampRequest,
    responses(
        (status = 200, description = "Formatted", body = FormatResponse),
        (status = 422, description = "Timestamp outside the supported range", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn format_timestamp(
    State(state): State<SharedState>,
    Json(request): Json<FormatTimestampRequest>,
) -> ApiResult<Json<FormatResponse>> {
    let formats = &state.config.format;
    let pattern = request
        .pattern
        .as_deref()
        .unwrap_or(&formats.date_time_pattern);
    let formatted = andromeda_core::format_optional_timestamp(
        request.timestamp_ms,
        pattern,
        formats.placeholder_for(pattern),
    )?;
    Ok(Json(FormatResponse { formatted }))
}

/// Parse text into a Jalali date-time.
#[utoipa::path(
    post,
    path = "/api/parse",
    tag = "calendar",
    operation_id = "parseDate",
    summary = "Parse a date",
    description = "Parses text produced with a pattern back into Jalali \
        components and resolves the instant.",
    request_body = ParseRequest,
    responses(
        (status = 200, description = "Parsed", body = DateResponse),
        (status = 400, description = "Text does not match the pattern", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn parse_date(
    State(state): State<SharedState>,
    Json(request): Json<ParseRequest>,
) -> ApiResult<Json<DateResponse>> {
    let formats = &state.config.format;
    let (date, pattern) = match request.pattern.as_deref() {
        Some(pattern) => (andromeda_core::parse(&request.input, pattern)?, pattern),
        None => andromeda_core::parse(&request.input, &formats.date_time_pattern)
            .map(|date| (date, formats.date_time_pattern.as_str()))
            .or_else(|_| {
                andromeda_core::parse(&request.input, &formats.date_pattern)
                    .map(|date| (date, formats.date_pattern.as_str()))
            })?,
    };

    let timestamp_ms = date.to_timestamp()?;
    Ok(Json(DateResponse {
        timestamp_ms,
        formatted: date.format(pattern),
        offset: andromeda_core::iran_offset_at(timestamp_ms)?,
        date,
    }))
}

/// Count calendar days between two dates.
#[utoipa::path(
    post,
    path = "/api/days-between",
    tag = "calendar",
    operation_id = "daysBetween",
    summary = "Days between two dates",
    description = "Returns the number of whole calendar days from `from` to \
        `to`, ignoring the time of day.",
    request_body = DaysBetweenRequest,
    responses(
        (status = 200, description = "Computed", body = DaysBetweenResponse),
        (status = 400, description = "Invalid components", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn days_between(
    State(state): State<SharedState>,
    Json(request): Json<DaysBetweenRequest>,
) -> ApiResult<Json<DaysBetweenResponse>> {
    check_components(&state, &request.from)?;
    check_components(&state, &request.to)?;
    Ok(Json(DaysBetweenResponse {
        days: request.from.days_until(&request.to),
    }))
}

/// Move a date by whole calendar days.
#[utoipa::path(
    post,
    path = "/api/add-days",
    tag = "calendar",
    operation_id = "addDays",
    summary = "Add days to a date",
    description = "Moves the date by the given number of calendar days and \
        keeps the wall-clock time, even across a daylight saving change.",
    request_body = AddDaysRequest,
    responses(
        (status = 200, description = "Computed", body = DateResponse),
        (status = 400, description = "Invalid components", body = crate::api::error::ErrorResponse),
        (status = 422, description = "Result outside the supported range", body = crate::api::error::ErrorResponse)
    )
)]
pub async fn add_days(
    State(state): State<SharedState>,
    Json(request): Json<AddDaysRequest>,
) -> ApiResult<Json<DateResponse>> {
    check_components(&state, &request.date)?;
    let date = request.date.plus_days(request.days)?;
    let timestamp_ms = date.to_timestamp()?;

    Ok(Json(DateResponse {
        timestamp_ms,
        formatted: date.format(&state.config.format.date_time_pattern),
        offset: andromeda_core::iran_offset_at(timestamp_ms)?,
        date,
    }))
}

/// Check whether Iran daylight saving time applies at an instant.
#[utoipa::path(
    get,
    path = "/api/dst",
    tag = "calendar",
    operation_id = "getDst",
    summary = "Daylight saving status",
    description = "Daylight saving (UTC+04:30) applied from 2 Farvardin through \
        the end of Shahrivar until it was abolished in 1402. Standard time is \
        UTC+03:30.",
    params(DstQuery),
    responses(
        (status = 200, description = "Status", body = DstResponse)
    )
)]
pub async fn get_dst(Query(query): Query<DstQuery>) -> ApiResult<Json<DstResponse>> {
    let offset = andromeda_core::iran_offset_at(query.timestamp_ms)?;
    Ok(Json(DstResponse {
        timestamp_ms: query.timestamp_ms,
        is_daylight_saving: offset.is_daylight(),
        offset,
        utc_offset: offset.to_string(),
        abbreviation: offset.abbreviation().to_string(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn describe_instant(timestamp_ms: i64, pattern: &str) -> ApiResult<DateResponse> {
    let date = andromeda_core::from_timestamp(timestamp_ms)?;
    Ok(DateResponse {
        timestamp_ms,
        formatted: date.format(pattern),
        offset: andromeda_core::iran_offset_at(timestamp_ms)?,
        date,
    })
}

/// Rejects out-of-range components when strict validation is on.
fn check_components(state: &SharedState, date: &PersianDateTime) -> ApiResult<()> {
    if state.config.validation.strict {
        date.validate().map_err(ApiError::from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_response_serialization() {
        let response = describe_instant(0, "yyyy/MM/dd").unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["formatted"], "1348/10/11");
        assert_eq!(json["date"]["hour"], 3);
        assert_eq!(json["offset"], "standard");
    }

    #[test]
    fn test_format_timestamp_request_allows_missing_timestamp() {
        let request: FormatTimestampRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.timestamp_ms, None);
        assert_eq!(request.pattern, None);
    }

    #[test]
    fn test_format_request_time_defaults() {
        let json = r#"{"date": {"year": 1404, "month": 1, "day": 1}, "pattern": "yyyy"}"#;
        let request: FormatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.date, PersianDateTime::date(1404, 1, 1).unwrap());
    }
}

//! # andromeda-core
//!
//! Jalali (Persian, solar Hijri) calendar conversion for Iran local time.
//!
//! This crate provides:
//! - Conversion between Unix milliseconds and Jalali date-times, applying
//!   Iran Standard Time and the historical daylight saving rule
//! - Pattern formatting (`yyyy/MM/dd HH:mm:ss`) and parsing
//! - Calendar-day arithmetic and comparison
//! - Configuration management for the HTTP service
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`convert`] - Timestamp to Jalali and back, plus the "now" entry points
//! - [`jdn`] - Julian Day Number arithmetic over the 2820-year cycle
//! - [`dst`] - Iran offset and daylight saving determination
//! - [`format`] - Token substitution formatting and pattern parsing
//! - [`date`] - The [`PersianDateTime`] value type and calendar helpers
//! - [`arithmetic`] - Day arithmetic, ordering and `chrono` interop
//! - [`clock`] - Injectable source of the current instant
//! - [`config`] - Application configuration loading, saving, and validation
//! - [`error`] - Unified error types for the crate
//!
//! ## Example
//!
//! ```rust
//! use andromeda_core::{format, from_timestamp, parse, to_timestamp};
//!
//! let date = from_timestamp(1_700_000_000_000).unwrap();
//! assert_eq!(format(&date, "yyyy/MM/dd HH:mm"), "1402/08/24 01:43");
//!
//! let parsed = parse("1402/08/24 01:43:20", "yyyy/MM/dd HH:mm:ss").unwrap();
//! assert_eq!(to_timestamp(&parsed).unwrap(), 1_700_000_000_000);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod arithmetic;
pub mod clock;
pub mod config;
pub mod convert;
pub mod date;
pub mod dst;
pub mod error;
pub mod format;
pub mod jdn;

// Re-export primary types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use crate::config::{
    Config, ConfigError, ConfigResult, FormatConfig, LoggingConfig, ServerConfig, ValidationConfig,
};
pub use convert::{from_timestamp, now, now_default_formatted, now_formatted, now_with, to_timestamp};
pub use date::{days_in_month, days_in_year, is_leap_year, PersianDateTime, PersianMonth};
pub use dst::{is_iran_daylight_saving, iran_offset_at, IranOffset};
pub use error::{CalendarError, Result};
pub use format::{
    format, format_optional_timestamp, format_timestamp, parse, DEFAULT_DATE_PATTERN,
    DEFAULT_DATE_TIME_PATTERN,
};
pub use jdn::{jalali_from_jdn, jdn_from_jalali};

//! Unified error types for the andromeda core library.
//!
//! This module provides a unified error type [`CalendarError`] that covers all failure
//! modes of the calendar converter. The configuration module keeps its own
//! [`ConfigError`](crate::config::ConfigError) for internal use and converts into this one.
//!
//! Conversions are permissive: out-of-range components produce a defined result
//! instead of an error. Input variants only surface from the validating constructors
//! and from parsing; overflow comes from checked arithmetic.
//!
//! # Example
//!
//! ```rust
//! use andromeda_core::error::{CalendarError, Result};
//!
//! fn check_month(month: u32) -> Result<()> {
//!     if !(1..=12).contains(&month) {
//!         return Err(CalendarError::invalid_component("month", month, "must be between 1 and 12"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_month(13).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for all andromeda operations.
#[derive(Debug, Error)]
pub enum CalendarError {
    // =========================================================================
    // INPUT ERRORS
    // =========================================================================
    /// A date or time component is outside its valid range.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidDateComponents {
        /// Name of the offending component (`month`, `day`, ...).
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Why the value was rejected.
        reason: String,
    },

    /// The input text does not match the formatting pattern.
    #[error("Input '{input}' does not match pattern '{pattern}'")]
    PatternMismatch {
        /// The pattern that was expected.
        pattern: String,
        /// The text that failed to match.
        input: String,
    },

    /// A timestamp or calendar computation exceeded the supported integer range.
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    // =========================================================================
    // CONFIGURATION ERRORS
    // =========================================================================
    /// The configuration file was not found at the expected path.
    #[error("Configuration file not found at: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration file exists but could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// The configuration was parsed but contains invalid values.
    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // =========================================================================
    // I/O ERRORS
    // =========================================================================
    /// A low-level I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized [`Result`] type for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;

impl CalendarError {
    /// Builds an [`CalendarError::InvalidDateComponents`] error.
    pub fn invalid_component(
        field: &'static str,
        value: impl Into<i64>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDateComponents {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Builds an [`CalendarError::ArithmeticOverflow`] error for the named operation.
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::ArithmeticOverflow(operation.into())
    }

    /// Returns `true` if this error was caused by caller input.
    #[inline]
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateComponents { .. } | Self::PatternMismatch { .. }
        )
    }

    /// Returns `true` if this error is related to configuration.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_) | Self::ConfigParseError(_) | Self::ConfigValidationError(_)
        )
    }

    /// Returns `true` if this error is related to I/O.
    #[inline]
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError(_))
    }

    /// Returns an HTTP-appropriate status code for this error.
    #[inline]
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - malformed input
            Self::InvalidDateComponents { .. } | Self::PatternMismatch { .. } => 400,

            // 404 Not Found
            Self::ConfigNotFound(_) => 404,

            // 422 Unprocessable Entity - well-formed but not computable
            Self::ArithmeticOverflow(_) => 422,

            // 500 Internal Server Error - server-side issues
            Self::ConfigParseError(_) | Self::ConfigValidationError(_) | Self::IoError(_) => 500,
        }
    }

    /// Returns a machine-readable error code for API responses.
    #[inline]
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateComponents { .. } => "INVALID_DATE_COMPONENTS",
            Self::PatternMismatch { .. } => "PATTERN_MISMATCH",
            Self::ArithmeticOverflow(_) => "ARITHMETIC_OVERFLOW",
            Self::ConfigNotFound(_) => "CONFIG_NOT_FOUND",
            Self::ConfigParseError(_) => "CONFIG_PARSE_ERROR",
            Self::ConfigValidationError(_) => "CONFIG_VALIDATION_ERROR",
            Self::IoError(_) => "IO_ERROR",
        }
    }
}

// =============================================================================
// CONVERSIONS FROM MODULE-SPECIFIC ERRORS
// =============================================================================

impl From<crate::config::ConfigError> for CalendarError {
    fn from(err: crate::config::ConfigError) -> Self {
        use crate::config::ConfigError;
        match err {
            ConfigError::NotFound(path) => Self::ConfigNotFound(path),
            ConfigError::LoadError(e) => Self::ConfigParseError(e.to_string()),
            ConfigError::WriteError { path, source } => Self::IoError(std::io::Error::new(
                source.kind(),
                format!("Failed to write {}: {}", path.display(), source),
            )),
            ConfigError::SerializeError(e) => Self::ConfigParseError(e.to_string()),
            ConfigError::ValidationError { field, message } => {
                Self::ConfigValidationError(format!("{field}: {message}"))
            }
            ConfigError::MultipleValidationErrors(errors) => {
                let messages: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
                Self::ConfigValidationError(messages.join("; "))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoErr, ErrorKind};

    #[test]
    fn test_input_error_classification() {
        assert!(CalendarError::invalid_component("month", 13, "out of range").is_input_error());
        assert!(CalendarError::PatternMismatch {
            pattern: "yyyy".into(),
            input: "abc".into(),
        }
        .is_input_error());

        assert!(!CalendarError::overflow("add").is_input_error());
    }

    #[test]
    fn test_config_error_classification() {
        assert!(CalendarError::ConfigNotFound(PathBuf::from("/test")).is_config_error());
        assert!(CalendarError::ConfigParseError("syntax error".into()).is_config_error());
        assert!(CalendarError::ConfigValidationError("invalid value".into()).is_config_error());

        assert!(!CalendarError::overflow("add").is_config_error());
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            CalendarError::invalid_component("day", 35, "too large").http_status_code(),
            400
        );
        assert_eq!(
            CalendarError::ConfigNotFound(PathBuf::new()).http_status_code(),
            404
        );
        assert_eq!(CalendarError::overflow("mul").http_status_code(), 422);
        assert_eq!(
            CalendarError::ConfigParseError("error".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalendarError::invalid_component("day", 0, "too small").error_code(),
            "INVALID_DATE_COMPONENTS"
        );
        assert_eq!(
            CalendarError::overflow("sub").error_code(),
            "ARITHMETIC_OVERFLOW"
        );
        assert_eq!(
            CalendarError::ConfigNotFound(PathBuf::new()).error_code(),
            "CONFIG_NOT_FOUND"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoErr::new(ErrorKind::NotFound, "file not found");
        let err: CalendarError = io_err.into();
        assert!(matches!(err, CalendarError::IoError(_)));
        assert!(err.is_io_error());
    }

    #[test]
    fn test_error_display_messages() {
        let err = CalendarError::invalid_component("month", 13, "must be between 1 and 12");
        assert_eq!(
            err.to_string(),
            "Invalid month '13': must be between 1 and 12"
        );

        let err = CalendarError::PatternMismatch {
            pattern: "yyyy/MM/dd".into(),
            input: "1404-01-01".into(),
        };
        assert!(err.to_string().contains("1404-01-01"));
    }

    #[test]
    fn test_from_config_validation_errors() {
        use crate::config::ConfigError;

        let err: CalendarError = ConfigError::MultipleValidationErrors(vec![
            ConfigError::ValidationError {
                field: "server.port".into(),
                message: "must not be 0".into(),
            },
            ConfigError::ValidationError {
                field: "format.date_pattern".into(),
                message: "must not be empty".into(),
            },
        ])
        .into();

        assert!(err.is_config_error());
        assert!(err.to_string().contains("server.port"));
        assert!(err.to_string().contains("format.date_pattern"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<CalendarError>();
        assert_sync::<CalendarError>();
    }
}

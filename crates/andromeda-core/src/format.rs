//! Pattern formatting and parsing.
//!
//! Patterns are plain text with six literal tokens:
//!
//! | Token  | Field  | Width                |
//! |--------|--------|----------------------|
//! | `yyyy` | year   | zero-padded to 4     |
//! | `MM`   | month  | zero-padded to 2     |
//! | `dd`   | day    | zero-padded to 2     |
//! | `HH`   | hour   | zero-padded to 2     |
//! | `mm`   | minute | zero-padded to 2     |
//! | `ss`   | second | zero-padded to 2     |
//!
//! Anything else passes through unchanged. Formatting replaces every
//! occurrence of one token before moving to the next, in the order above.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::from_timestamp;
use crate::date::PersianDateTime;
use crate::error::{CalendarError, Result};

/// Default date pattern.
pub const DEFAULT_DATE_PATTERN: &str = "yyyy/MM/dd";

/// Default date-time pattern.
pub const DEFAULT_DATE_TIME_PATTERN: &str = "yyyy/MM/dd HH:mm:ss";

/// Placeholder rendered for a missing timestamp with [`DEFAULT_DATE_PATTERN`].
pub const DEFAULT_DATE_PLACEHOLDER: &str = "----/--/--";

/// Placeholder rendered for a missing timestamp with [`DEFAULT_DATE_TIME_PATTERN`].
pub const DEFAULT_DATE_TIME_PLACEHOLDER: &str = "----/--/-- --:--:--";

/// Matches any pattern token, leftmost first.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("yyyy|MM|dd|HH|mm|ss").unwrap_or_else(|e| panic!("Invalid token regex: {e}"))
});

/// A formatting token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Token {
    /// Replacement order.
    const ALL: [Self; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    const fn literal(self) -> &'static str {
        match self {
            Self::Year => "yyyy",
            Self::Month => "MM",
            Self::Day => "dd",
            Self::Hour => "HH",
            Self::Minute => "mm",
            Self::Second => "ss",
        }
    }

    fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.literal() == literal)
    }

    fn render(self, dt: &PersianDateTime) -> String {
        match self {
            Self::Year => format!("{:04}", dt.year),
            Self::Month => format!("{:02}", dt.month),
            Self::Day => format!("{:02}", dt.day),
            Self::Hour => format!("{:02}", dt.hour),
            Self::Minute => format!("{:02}", dt.minute),
            Self::Second => format!("{:02}", dt.second),
        }
    }

    const fn capture(self) -> &'static str {
        match self {
            // Mirrors the `{:04}` rendering: four digits or more, sign included.
            Self::Year => r"(-\d{3,}|\d{4,})",
            _ => r"(\d{2})",
        }
    }
}

/// Formats a date-time with the given pattern.
///
/// ```rust
/// use andromeda_core::{format, PersianDateTime};
///
/// let nowruz = PersianDateTime::date(1404, 1, 1).unwrap();
/// assert_eq!(format(&nowruz, "yyyy/MM/dd"), "1404/01/01");
/// assert_eq!(format(&nowruz, "dd.MM (yyyy)"), "01.01 (1404)");
/// ```
#[must_use]
pub fn format(dt: &PersianDateTime, pattern: &str) -> String {
    let mut output = pattern.to_owned();
    for token in Token::ALL {
        if output.contains(token.literal()) {
            output = output.replace(token.literal(), &token.render(dt));
        }
    }
    output
}

/// Converts a Unix timestamp and formats it.
///
/// # Errors
///
/// Propagates [`CalendarError::ArithmeticOverflow`] from the conversion.
pub fn format_timestamp(timestamp_millis: i64, pattern: &str) -> Result<String> {
    Ok(format(&from_timestamp(timestamp_millis)?, pattern))
}

/// Formats an optional timestamp, rendering `placeholder` when it is absent.
///
/// # Errors
///
/// Propagates [`CalendarError::ArithmeticOverflow`] from the conversion.
pub fn format_optional_timestamp(
    timestamp_millis: Option<i64>,
    pattern: &str,
    placeholder: &str,
) -> Result<String> {
    timestamp_millis.map_or_else(
        || Ok(placeholder.to_owned()),
        |millis| format_timestamp(millis, pattern),
    )
}

/// Returns `true` if the pattern contains at least one token.
#[must_use]
pub fn has_format_token(pattern: &str) -> bool {
    TOKEN_REGEX.is_match(pattern)
}

/// Parses text produced by [`format`] with the same pattern.
///
/// Missing date tokens default to 1 and missing time tokens to 0. A token
/// that appears more than once must carry the same value each time. The
/// result is validated.
///
/// # Errors
///
/// - [`CalendarError::PatternMismatch`] if the input does not fit the pattern.
/// - [`CalendarError::InvalidDateComponents`] if the parsed value is not a
///   valid date-time.
///
/// ```rust
/// use andromeda_core::{parse, PersianDateTime};
///
/// let parsed = parse("1404/01/01 10:00:48", "yyyy/MM/dd HH:mm:ss").unwrap();
/// assert_eq!(parsed, PersianDateTime::new(1404, 1, 1, 10, 0, 48).unwrap());
/// ```
pub fn parse(input: &str, pattern: &str) -> Result<PersianDateTime> {
    let mismatch = || CalendarError::PatternMismatch {
        pattern: pattern.to_owned(),
        input: input.to_owned(),
    };

    let (regex, tokens) = compile_pattern(pattern).ok_or_else(mismatch)?;
    let captures = regex.captures(input).ok_or_else(|| {
        tracing::debug!(input, pattern, "Input does not match pattern");
        mismatch()
    })?;

    let mut fields: [Option<i64>; 6] = [None; 6];
    for (index, token) in tokens.iter().enumerate() {
        let text = captures.get(index + 1).ok_or_else(mismatch)?.as_str();
        let value: i64 = text.parse().map_err(|_| mismatch())?;
        let slot = *token as usize;
        let existing = fields[slot];
        match existing {
            Some(previous) if previous != value => return Err(mismatch()),
            Some(_) => {}
            None => fields[slot] = Some(value),
        }
    }

    let year = i32::try_from(fields[Token::Year as usize].unwrap_or(1)).map_err(|_| mismatch())?;
    let component = |token: Token, default: i64| -> Result<u32> {
        u32::try_from(fields[token as usize].unwrap_or(default)).map_err(|_| mismatch())
    };

    let parsed = PersianDateTime::from_parts(
        year,
        component(Token::Month, 1)?,
        component(Token::Day, 1)?,
        component(Token::Hour, 0)?,
        component(Token::Minute, 0)?,
        component(Token::Second, 0)?,
    );
    parsed.validate()?;
    Ok(parsed)
}

/// Builds an anchored regex for `pattern` and the token behind each capture group.
fn compile_pattern(pattern: &str) -> Option<(Regex, Vec<Token>)> {
    let mut source = String::from("^");
    let mut tokens = Vec::new();
    let mut last = 0;

    for found in TOKEN_REGEX.find_iter(pattern) {
        let token = Token::from_literal(found.as_str())?;
        source.push_str(&regex::escape(&pattern[last..found.start()]));
        source.push_str(token.capture());
        tokens.push(token);
        last = found.end();
    }
    source.push_str(&regex::escape(&pattern[last..]));
    source.push('$');

    Regex::new(&source).ok().map(|regex| (regex, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersianDateTime {
        PersianDateTime::new(1404, 7, 9, 5, 3, 7).unwrap()
    }

    #[test]
    fn test_default_patterns() {
        assert_eq!(format(&sample(), DEFAULT_DATE_PATTERN), "1404/07/09");
        assert_eq!(
            format(&sample(), DEFAULT_DATE_TIME_PATTERN),
            "1404/07/09 05:03:07"
        );
    }

    #[test]
    fn test_tokens_repeat_in_any_order() {
        assert_eq!(format(&sample(), "ss-mm-HH dd|MM|yyyy dd"), "07-03-05 09|07|1404 09");
    }

    #[test]
    fn test_unknown_text_passes_through() {
        assert_eq!(format(&sample(), "Date: yyyy (Y M D)"), "Date: 1404 (Y M D)");
        assert_eq!(format(&sample(), "no tokens"), "no tokens");
        assert_eq!(format(&sample(), ""), "");
    }

    #[test]
    fn test_case_sensitive_tokens() {
        assert_eq!(format(&sample(), "MM mm"), "07 03");
        assert_eq!(format(&sample(), "MMM"), "07M");
        assert_eq!(format(&sample(), "yyyyy"), "1404y");
    }

    #[test]
    fn test_year_padding() {
        let early = PersianDateTime::from_parts(7, 1, 1, 0, 0, 0);
        assert_eq!(format(&early, "yyyy"), "0007");
        let negative = PersianDateTime::from_parts(-5, 1, 1, 0, 0, 0);
        assert_eq!(format(&negative, "yyyy"), "-005");
    }

    #[test]
    fn test_format_optional_timestamp() {
        assert_eq!(
            format_optional_timestamp(None, DEFAULT_DATE_PATTERN, DEFAULT_DATE_PLACEHOLDER)
                .unwrap(),
            "----/--/--"
        );
        assert_eq!(
            format_optional_timestamp(Some(0), DEFAULT_DATE_PATTERN, DEFAULT_DATE_PLACEHOLDER)
                .unwrap(),
            "1348/10/11"
        );
    }

    #[test]
    fn test_has_format_token() {
        assert!(has_format_token("yyyy"));
        assert!(has_format_token("at HH"));
        assert!(!has_format_token("YYYY/mM"));
    }

    #[test]
    fn test_parse_round_trip() {
        for pattern in [
            DEFAULT_DATE_TIME_PATTERN,
            "yyyyMMddHHmmss",
            "HH:mm:ss on dd.MM.yyyy",
            "[yyyy] (MM) {dd} HH*mm+ss",
        ] {
            let text = format(&sample(), pattern);
            assert_eq!(parse(&text, pattern).unwrap(), sample(), "pattern {pattern}");
        }
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        assert_eq!(
            parse("1402/03", "yyyy/MM").unwrap(),
            PersianDateTime::date(1402, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_negative_year() {
        let parsed = parse("-005/01/01", DEFAULT_DATE_PATTERN).unwrap();
        assert_eq!(parsed.year, -5);
    }

    #[test]
    fn test_parse_rejects_short_year() {
        assert!(matches!(
            parse("5/01/01", DEFAULT_DATE_PATTERN),
            Err(CalendarError::PatternMismatch { .. })
        ));
        assert!(matches!(
            parse("-5/01/01", DEFAULT_DATE_PATTERN),
            Err(CalendarError::PatternMismatch { .. })
        ));
        assert_eq!(parse("0005/01/01", DEFAULT_DATE_PATTERN).unwrap().year, 5);
        assert_eq!(parse("12345/01/01", DEFAULT_DATE_PATTERN).unwrap().year, 12345);
    }

    #[test]
    fn test_parse_rejects_mismatched_input() {
        assert!(matches!(
            parse("1404-01-01", DEFAULT_DATE_PATTERN),
            Err(CalendarError::PatternMismatch { .. })
        ));
        assert!(matches!(
            parse("1404/1/01", DEFAULT_DATE_PATTERN),
            Err(CalendarError::PatternMismatch { .. })
        ));
        assert!(matches!(
            parse("1404/01/01 trailing", DEFAULT_DATE_PATTERN),
            Err(CalendarError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_conflicting_repeated_token() {
        assert!(parse("1404/01/01 01", "yyyy/MM/dd dd").is_ok());
        assert!(matches!(
            parse("1404/01/01 02", "yyyy/MM/dd dd"),
            Err(CalendarError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_validates_components() {
        assert!(matches!(
            parse("1404/13/01", DEFAULT_DATE_PATTERN),
            Err(CalendarError::InvalidDateComponents { field: "month", .. })
        ));
        assert!(matches!(
            parse("1403/12/30", DEFAULT_DATE_PATTERN),
            Err(CalendarError::InvalidDateComponents { field: "day", .. })
        ));
    }

    #[test]
    fn test_pattern_literals_are_escaped() {
        assert!(parse("1404.01.01", "yyyy.MM.dd").is_ok());
        assert!(parse("1404x01x01", "yyyy.MM.dd").is_err());
    }
}

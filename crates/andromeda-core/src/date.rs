//! The Jalali date-time value type and calendar helpers.
//!
//! [`PersianDateTime`] is a plain value: constructing one through its public
//! fields or [`PersianDateTime::from_parts`] performs no validation, so
//! out-of-range components flow through the conversions unchanged. The
//! validating constructors ([`PersianDateTime::new`], [`PersianDateTime::date`])
//! reject them with [`CalendarError::InvalidDateComponents`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{CalendarError, Result};
use crate::format::{self, DEFAULT_DATE_PATTERN, DEFAULT_DATE_TIME_PATTERN};
use crate::jdn::{jdn_from_components, jdn_from_jalali, next_year};

/// A date and wall-clock time in the Jalali calendar, Iran local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "year": 1404,
    "month": 1,
    "day": 1,
    "hour": 10,
    "minute": 0,
    "second": 48,
    "millisecond": 0
}))]
pub struct PersianDateTime {
    /// Jalali year. May be zero or negative; there is no lower bound.
    #[schema(example = 1404)]
    pub year: i32,

    /// Month, nominally 1 (Farvardin) to 12 (Esfand).
    #[schema(example = 1)]
    pub month: u32,

    /// Day of month, nominally 1 to 31.
    #[schema(example = 1)]
    pub day: u32,

    /// Hour of day (0-23).
    #[serde(default)]
    #[schema(example = 10)]
    pub hour: u32,

    /// Minute (0-59).
    #[serde(default)]
    #[schema(example = 0)]
    pub minute: u32,

    /// Second (0-59).
    #[serde(default)]
    #[schema(example = 48)]
    pub second: u32,

    /// Millisecond (0-999).
    #[serde(default)]
    #[schema(example = 0)]
    pub millisecond: u32,
}

impl PersianDateTime {
    /// Creates a value without validating any component.
    #[must_use]
    pub const fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond: 0,
        }
    }

    /// Creates a validated date-time.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDateComponents`] if any component is out
    /// of range for the calendar (including Esfand 30 in a common year).
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Result<Self> {
        let value = Self::from_parts(year, month, day, hour, minute, second);
        value.validate()?;
        Ok(value)
    }

    /// Creates a validated date at midnight.
    ///
    /// # Errors
    ///
    /// See [`PersianDateTime::new`].
    pub fn date(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Returns a copy with the given millisecond, unvalidated.
    #[must_use]
    pub const fn with_millisecond(self, millisecond: u32) -> Self {
        Self {
            millisecond,
            ..self
        }
    }

    /// Returns a copy with the given wall-clock time, unvalidated.
    #[must_use]
    pub const fn with_time(self, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond: 0,
            ..self
        }
    }

    /// Checks every component against the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDateComponents`] naming the first
    /// offending component.
    pub fn validate(&self) -> Result<()> {
        let Some(max_day) = days_in_month(self.year, self.month) else {
            return Err(CalendarError::invalid_component(
                "month",
                self.month,
                "must be between 1 and 12",
            ));
        };
        if self.day == 0 || self.day > max_day {
            return Err(CalendarError::invalid_component(
                "day",
                self.day,
                format!(
                    "must be between 1 and {max_day} for month {} of year {}",
                    self.month, self.year
                ),
            ));
        }
        if self.hour > 23 {
            return Err(CalendarError::invalid_component(
                "hour",
                self.hour,
                "must be between 0 and 23",
            ));
        }
        if self.minute > 59 {
            return Err(CalendarError::invalid_component(
                "minute",
                self.minute,
                "must be between 0 and 59",
            ));
        }
        if self.second > 59 {
            return Err(CalendarError::invalid_component(
                "second",
                self.second,
                "must be between 0 and 59",
            ));
        }
        if self.millisecond > 999 {
            return Err(CalendarError::invalid_component(
                "millisecond",
                self.millisecond,
                "must be between 0 and 999",
            ));
        }
        Ok(())
    }

    /// Returns `true` if [`validate`](Self::validate) would succeed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// The named month, if `month` is in range.
    #[must_use]
    pub fn persian_month(&self) -> Option<PersianMonth> {
        PersianMonth::try_from(self.month).ok()
    }

    /// One-based day of the year (1 Farvardin is day 1).
    #[must_use]
    pub fn day_of_year(&self) -> i64 {
        self.julian_day_number() - jdn_from_jalali(self.year, 1, 1) + 1
    }

    /// Julian Day Number of this date.
    #[must_use]
    pub fn julian_day_number(&self) -> i64 {
        jdn_from_jalali(self.year, self.month, self.day)
    }

    /// Whether this date's year has 366 days.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }
}

impl fmt::Display for PersianDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format(self, DEFAULT_DATE_TIME_PATTERN))
    }
}

impl FromStr for PersianDateTime {
    type Err = CalendarError;

    /// Parses `yyyy/MM/dd HH:mm:ss`, falling back to `yyyy/MM/dd`.
    fn from_str(s: &str) -> Result<Self> {
        format::parse(s, DEFAULT_DATE_TIME_PATTERN)
            .or_else(|_| format::parse(s, DEFAULT_DATE_PATTERN))
    }
}

/// The twelve months of the Jalali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersianMonth {
    /// Month 1, 31 days.
    Farvardin = 1,
    /// Month 2, 31 days.
    Ordibehesht,
    /// Month 3, 31 days.
    Khordad,
    /// Month 4, 31 days.
    Tir,
    /// Month 5, 31 days.
    Mordad,
    /// Month 6, 31 days.
    Shahrivar,
    /// Month 7, 30 days.
    Mehr,
    /// Month 8, 30 days.
    Aban,
    /// Month 9, 30 days.
    Azar,
    /// Month 10, 30 days.
    Dey,
    /// Month 11, 30 days.
    Bahman,
    /// Month 12, 29 days or 30 in a leap year.
    Esfand,
}

impl PersianMonth {
    /// All months in calendar order.
    pub const ALL: [Self; 12] = [
        Self::Farvardin,
        Self::Ordibehesht,
        Self::Khordad,
        Self::Tir,
        Self::Mordad,
        Self::Shahrivar,
        Self::Mehr,
        Self::Aban,
        Self::Azar,
        Self::Dey,
        Self::Bahman,
        Self::Esfand,
    ];

    /// Month number, 1 to 12.
    #[must_use]
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Transliterated month name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Farvardin => "Farvardin",
            Self::Ordibehesht => "Ordibehesht",
            Self::Khordad => "Khordad",
            Self::Tir => "Tir",
            Self::Mordad => "Mordad",
            Self::Shahrivar => "Shahrivar",
            Self::Mehr => "Mehr",
            Self::Aban => "Aban",
            Self::Azar => "Azar",
            Self::Dey => "Dey",
            Self::Bahman => "Bahman",
            Self::Esfand => "Esfand",
        }
    }

    /// Number of days this month has in the given year.
    #[must_use]
    pub fn days(self, year: i32) -> u32 {
        match self.number() {
            1..=6 => 31,
            7..=11 => 30,
            _ if is_leap_year(year) => 30,
            _ => 29,
        }
    }
}

impl TryFrom<u32> for PersianMonth {
    type Error = CalendarError;

    fn try_from(value: u32) -> Result<Self> {
        value
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index as usize).copied())
            .ok_or_else(|| {
                CalendarError::invalid_component("month", value, "must be between 1 and 12")
            })
    }
}

impl fmt::Display for PersianMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of days in the given Jalali year (365 or 366).
#[must_use]
pub fn days_in_year(year: i32) -> u32 {
    let year = i64::from(year);
    let length = jdn_from_components(next_year(year), 1, 1) - jdn_from_components(year, 1, 1);
    if length == 366 {
        366
    } else {
        365
    }
}

/// Whether the given Jalali year is a leap year (Esfand has 30 days).
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    days_in_year(year) == 366
}

/// Number of days in `month` of `year`, or `None` if `month` is not 1-12.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    PersianMonth::try_from(month).ok().map(|m| m.days(year))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The grand-cycle arithmetic places the leap year after 1399 on 1404,
    // one year later than the astronomical calendar does.
    #[test]
    fn test_known_leap_years() {
        for year in [1370, 1375, 1379, 1383, 1387, 1391, 1395, 1399, 1404, 1408] {
            assert!(is_leap_year(year), "{year} should be a leap year");
        }
        for year in [1400, 1401, 1402, 1403, 1405] {
            assert!(!is_leap_year(year), "{year} should be a common year");
        }
    }

    #[test]
    fn test_eight_leap_years_per_33_year_cycle() {
        let leaps = (1367..1400).filter(|&year| is_leap_year(year)).count();
        assert_eq!(leaps, 8);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1404, 1), Some(31));
        assert_eq!(days_in_month(1404, 6), Some(31));
        assert_eq!(days_in_month(1404, 7), Some(30));
        assert_eq!(days_in_month(1403, 12), Some(29));
        assert_eq!(days_in_month(1404, 12), Some(30));
        assert_eq!(days_in_month(1404, 0), None);
        assert_eq!(days_in_month(1404, 13), None);
    }

    #[test]
    fn test_validating_constructor() {
        assert!(PersianDateTime::new(1404, 1, 1, 10, 0, 48).is_ok());
        assert!(PersianDateTime::date(1404, 12, 30).is_ok());

        let err = PersianDateTime::date(1404, 13, 1).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::InvalidDateComponents { field: "month", .. }
        ));

        let err = PersianDateTime::date(1404, 1, 32).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::InvalidDateComponents { field: "day", .. }
        ));

        let err = PersianDateTime::date(1403, 12, 30).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::InvalidDateComponents { field: "day", value: 30, .. }
        ));

        assert!(PersianDateTime::new(1404, 1, 1, 24, 0, 0).is_err());
        assert!(PersianDateTime::new(1404, 1, 1, 0, 60, 0).is_err());
        assert!(PersianDateTime::new(1404, 1, 1, 0, 0, 60).is_err());
        assert!(!PersianDateTime::from_parts(1404, 1, 1, 0, 0, 0)
            .with_millisecond(1000)
            .is_valid());
    }

    #[test]
    fn test_permissive_constructor_keeps_values() {
        let value = PersianDateTime::from_parts(1404, 13, 35, 0, 0, 0);
        assert_eq!(value.month, 13);
        assert_eq!(value.day, 35);
        assert!(!value.is_valid());
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(PersianDateTime::date(1404, 1, 1).unwrap().day_of_year(), 1);
        assert_eq!(PersianDateTime::date(1404, 7, 1).unwrap().day_of_year(), 187);
        assert_eq!(PersianDateTime::date(1404, 12, 30).unwrap().day_of_year(), 366);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(PersianMonth::try_from(1).unwrap(), PersianMonth::Farvardin);
        assert_eq!(PersianMonth::try_from(10).unwrap().name(), "Dey");
        assert_eq!(PersianMonth::Esfand.number(), 12);
        assert!(PersianMonth::try_from(0).is_err());
        assert!(PersianMonth::try_from(13).is_err());
        assert_eq!(
            PersianDateTime::date(1348, 10, 11).unwrap().persian_month(),
            Some(PersianMonth::Dey)
        );
    }

    #[test]
    fn test_display_and_from_str() {
        let value = PersianDateTime::new(1404, 1, 1, 10, 0, 48).unwrap();
        assert_eq!(value.to_string(), "1404/01/01 10:00:48");
        assert_eq!("1404/01/01 10:00:48".parse::<PersianDateTime>().unwrap(), value);
        assert_eq!(
            "1404/01/01".parse::<PersianDateTime>().unwrap(),
            PersianDateTime::date(1404, 1, 1).unwrap()
        );
        assert!("1404-01-01".parse::<PersianDateTime>().is_err());
    }

    #[test]
    fn test_serde_defaults_time_components() {
        let value: PersianDateTime =
            serde_json::from_str(r#"{"year": 1402, "month": 3, "day": 15}"#).unwrap();
        assert_eq!(value, PersianDateTime::date(1402, 3, 15).unwrap());
    }
}

//! Day arithmetic, comparison and `chrono` interop on [`PersianDateTime`].
//!
//! Day arithmetic moves the calendar date and keeps the wall-clock time, so
//! adding a day across a daylight-saving change still lands on the same hour.
//! Use [`PersianDateTime::plus_duration`] for elapsed-time arithmetic.

use std::cmp::Ordering;

use chrono::{DateTime, TimeDelta, Utc};

use crate::convert::{from_timestamp, to_timestamp};
use crate::date::PersianDateTime;
use crate::error::{CalendarError, Result};
use crate::jdn::jalali_from_jdn;

impl PersianDateTime {
    /// The same date at 00:00:00.000.
    #[must_use]
    pub const fn at_start_of_day(self) -> Self {
        self.with_time(0, 0, 0)
    }

    /// The same date at 23:59:59.
    #[must_use]
    pub const fn at_end_of_day(self) -> Self {
        self.with_time(23, 59, 59)
    }

    /// Moves the date forward by `days` calendar days (backward if negative).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the resulting year is
    /// not representable.
    ///
    /// ```rust
    /// use andromeda_core::PersianDateTime;
    ///
    /// let last_of_esfand = PersianDateTime::date(1403, 12, 29).unwrap();
    /// assert_eq!(
    ///     last_of_esfand.plus_days(1).unwrap(),
    ///     PersianDateTime::date(1404, 1, 1).unwrap()
    /// );
    /// ```
    pub fn plus_days(self, days: i64) -> Result<Self> {
        let jdn = self
            .julian_day_number()
            .checked_add(days)
            .ok_or_else(|| CalendarError::overflow(format!("adding {days} days")))?;
        let (year, month, day) = jalali_from_jdn(jdn)?;
        Ok(Self {
            year,
            month,
            day,
            ..self
        })
    }

    /// Moves the date backward by `days` calendar days.
    ///
    /// # Errors
    ///
    /// See [`PersianDateTime::plus_days`].
    pub fn minus_days(self, days: i64) -> Result<Self> {
        let negated = days
            .checked_neg()
            .ok_or_else(|| CalendarError::overflow(format!("subtracting {days} days")))?;
        self.plus_days(negated)
    }

    /// Adds an elapsed duration to the instant this value denotes.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the instant leaves the
    /// `i64` millisecond range.
    pub fn plus_duration(&self, duration: TimeDelta) -> Result<Self> {
        let shifted = to_timestamp(self)?
            .checked_add(duration.num_milliseconds())
            .ok_or_else(|| CalendarError::overflow(format!("adding {duration}")))?;
        from_timestamp(shifted)
    }

    /// Orders two values by the instant they denote.
    ///
    /// # Errors
    ///
    /// See [`to_timestamp`].
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        Ok(to_timestamp(self)?.cmp(&to_timestamp(other)?))
    }

    /// Whether this value denotes an earlier instant than `other`.
    ///
    /// # Errors
    ///
    /// See [`to_timestamp`].
    pub fn is_before(&self, other: &Self) -> Result<bool> {
        Ok(self.compare(other)?.is_lt())
    }

    /// Whether this value denotes a later instant than `other`.
    ///
    /// # Errors
    ///
    /// See [`to_timestamp`].
    pub fn is_after(&self, other: &Self) -> Result<bool> {
        Ok(self.compare(other)?.is_gt())
    }

    /// Whole calendar days from this date to `other`, ignoring the time of day.
    ///
    /// Negative when `other` is earlier; `a.days_until(&b) == -b.days_until(&a)`.
    #[must_use]
    pub fn days_until(&self, other: &Self) -> i64 {
        other.julian_day_number() - self.julian_day_number()
    }

    /// Converts a `chrono` UTC instant.
    ///
    /// # Errors
    ///
    /// See [`from_timestamp`].
    pub fn from_datetime(datetime: DateTime<Utc>) -> Result<Self> {
        from_timestamp(datetime.timestamp_millis())
    }

    /// The UTC instant this value denotes, as a `chrono` type.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the instant is outside
    /// the range `chrono` supports.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let millis = to_timestamp(self)?;
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| CalendarError::overflow(format!("{millis} ms is outside chrono's range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> PersianDateTime {
        PersianDateTime::date(year, month, day).unwrap()
    }

    #[test]
    fn test_start_and_end_of_day() {
        let value = PersianDateTime::new(1404, 5, 17, 14, 22, 9)
            .unwrap()
            .with_millisecond(250);
        assert_eq!(value.at_start_of_day(), date(1404, 5, 17));
        assert_eq!(
            value.at_end_of_day(),
            PersianDateTime::new(1404, 5, 17, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_plus_days_crosses_month_and_year() {
        assert_eq!(date(1404, 6, 31).plus_days(1).unwrap(), date(1404, 7, 1));
        assert_eq!(date(1404, 12, 30).plus_days(1).unwrap(), date(1405, 1, 1));
        assert_eq!(date(1405, 1, 1).minus_days(1).unwrap(), date(1404, 12, 30));
        assert_eq!(date(1404, 1, 1).plus_days(365).unwrap(), date(1404, 12, 30));
    }

    #[test]
    fn test_plus_days_keeps_time_across_dst_change() {
        let evening = PersianDateTime::new(1390, 6, 31, 0, 30, 0).unwrap();
        let next = evening.plus_days(1).unwrap();
        assert_eq!(next, PersianDateTime::new(1390, 7, 1, 0, 30, 0).unwrap());
        assert_eq!(next.minus_days(1).unwrap(), evening);
    }

    #[test]
    fn test_plus_duration_is_elapsed_time() {
        // Crossing the start of DST: 24 elapsed hours read as 25 on the wall clock.
        let before = PersianDateTime::new(1390, 1, 1, 12, 0, 0).unwrap();
        let after = before.plus_duration(TimeDelta::hours(24)).unwrap();
        assert_eq!(after, PersianDateTime::new(1390, 1, 2, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_comparisons() {
        let earlier = PersianDateTime::new(1402, 3, 15, 8, 0, 0).unwrap();
        let later = PersianDateTime::new(1402, 3, 15, 9, 0, 0).unwrap();
        assert!(earlier.is_before(&later).unwrap());
        assert!(later.is_after(&earlier).unwrap());
        assert!(!earlier.is_after(&earlier).unwrap());
        assert_eq!(earlier.compare(&earlier).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_days_until() {
        let start = PersianDateTime::new(1404, 1, 1, 23, 0, 0).unwrap();
        let end = PersianDateTime::new(1404, 1, 11, 1, 0, 0).unwrap();
        assert_eq!(start.days_until(&end), 10);
        assert_eq!(end.days_until(&start), -10);
        assert_eq!(date(1390, 1, 1).days_until(&date(1390, 1, 3)), 2);
        assert_eq!(date(1403, 1, 1).days_until(&date(1404, 1, 1)), 365);
    }

    #[test]
    fn test_chrono_interop() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        let persian = PersianDateTime::from_datetime(utc).unwrap();
        assert_eq!(persian, PersianDateTime::new(1404, 1, 1, 3, 30, 0).unwrap());
        assert_eq!(persian.to_datetime().unwrap(), utc);
    }
}

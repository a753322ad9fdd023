//! Conversion between Unix timestamps and Jalali date-times.
//!
//! [`from_timestamp`] reads an instant in Iran local time; [`to_timestamp`]
//! goes back. For every instant `t`, `to_timestamp(&from_timestamp(t)?)? == t`,
//! except inside the hour repeated when a pre-1402 daylight-saving period
//! ended: both instants of that hour read as the same wall-clock time, and the
//! reverse conversion resolves it to the later (standard time) instant.

use crate::clock::{Clock, SystemClock};
use crate::date::PersianDateTime;
use crate::dst::{iran_offset_at, IRAN_STANDARD_OFFSET_MILLIS};
use crate::error::{CalendarError, Result};
use crate::format::{format, DEFAULT_DATE_TIME_PATTERN};
use crate::jdn::{jalali_from_jdn, jdn_from_jalali, MILLIS_PER_DAY, UNIX_EPOCH_JDN};

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

/// Converts a Unix timestamp (UTC milliseconds) to Iran local time in the
/// Jalali calendar.
///
/// # Errors
///
/// Returns [`CalendarError::ArithmeticOverflow`] when the instant is too
/// close to the `i64` limits to apply the Iran offset.
///
/// ```rust
/// use andromeda_core::{from_timestamp, PersianDateTime};
///
/// let epoch = from_timestamp(0).unwrap();
/// assert_eq!(epoch, PersianDateTime::new(1348, 10, 11, 3, 30, 0).unwrap());
/// ```
pub fn from_timestamp(timestamp_millis: i64) -> Result<PersianDateTime> {
    let offset = iran_offset_at(timestamp_millis)?;
    let local = timestamp_millis
        .checked_add(offset.as_millis())
        .ok_or_else(|| CalendarError::overflow("applying the Iran offset"))?;

    let days_since_epoch = local.div_euclid(MILLIS_PER_DAY);
    let millis_of_day = local.rem_euclid(MILLIS_PER_DAY);

    let (year, month, day) = jalali_from_jdn(days_since_epoch + UNIX_EPOCH_JDN)?;

    Ok(PersianDateTime {
        year,
        month,
        day,
        hour: time_component(millis_of_day / MILLIS_PER_HOUR)?,
        minute: time_component(millis_of_day % MILLIS_PER_HOUR / MILLIS_PER_MINUTE)?,
        second: time_component(millis_of_day % MILLIS_PER_MINUTE / MILLIS_PER_SECOND)?,
        millisecond: time_component(millis_of_day % MILLIS_PER_SECOND)?,
    })
}

/// Converts a Jalali date-time in Iran local time to a Unix timestamp (UTC
/// milliseconds).
///
/// Components are not validated; call [`PersianDateTime::validate`] first
/// for strict behaviour.
///
/// # Errors
///
/// Returns [`CalendarError::ArithmeticOverflow`] if the instant does not fit
/// in an `i64`.
pub fn to_timestamp(dt: &PersianDateTime) -> Result<i64> {
    let days_since_epoch = jdn_from_jalali(dt.year, dt.month, dt.day) - UNIX_EPOCH_JDN;

    let time_of_day = i64::from(dt.hour) * MILLIS_PER_HOUR
        + i64::from(dt.minute) * MILLIS_PER_MINUTE
        + i64::from(dt.second) * MILLIS_PER_SECOND
        + i64::from(dt.millisecond);

    let local = days_since_epoch
        .checked_mul(MILLIS_PER_DAY)
        .and_then(|millis| millis.checked_add(time_of_day))
        .ok_or_else(|| CalendarError::overflow(format!("local time of {dt:?}")))?;

    // Daylight saving is looked up as if the wall-clock time were standard time.
    let as_standard = local
        .checked_sub(IRAN_STANDARD_OFFSET_MILLIS)
        .ok_or_else(|| CalendarError::overflow("removing the Iran standard offset"))?;
    let offset = iran_offset_at(as_standard)?;

    local
        .checked_sub(offset.as_millis())
        .ok_or_else(|| CalendarError::overflow("removing the Iran offset"))
}

/// The current instant in the Jalali calendar.
///
/// # Errors
///
/// See [`from_timestamp`].
pub fn now() -> Result<PersianDateTime> {
    now_with(&SystemClock)
}

/// The current instant read from `clock`.
///
/// # Errors
///
/// See [`from_timestamp`].
pub fn now_with(clock: &dyn Clock) -> Result<PersianDateTime> {
    from_timestamp(clock.now_millis())
}

/// The current instant formatted with `pattern`.
///
/// # Errors
///
/// See [`from_timestamp`].
pub fn now_formatted(pattern: &str) -> Result<String> {
    Ok(format(&now()?, pattern))
}

/// The current instant formatted with [`DEFAULT_DATE_TIME_PATTERN`].
///
/// # Errors
///
/// See [`from_timestamp`].
pub fn now_default_formatted() -> Result<String> {
    now_formatted(DEFAULT_DATE_TIME_PATTERN)
}

/// Narrows a time-of-day component computed from a non-negative remainder.
fn time_component(value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| CalendarError::overflow(format!("time-of-day component {value}")))
}

impl PersianDateTime {
    /// See [`from_timestamp`].
    ///
    /// # Errors
    ///
    /// See [`from_timestamp`].
    pub fn from_timestamp(timestamp_millis: i64) -> Result<Self> {
        from_timestamp(timestamp_millis)
    }

    /// See [`to_timestamp`].
    ///
    /// # Errors
    ///
    /// See [`to_timestamp`].
    pub fn to_timestamp(&self) -> Result<i64> {
        to_timestamp(self)
    }

    /// Formats this value with `pattern`.
    #[must_use]
    pub fn format(&self, pattern: &str) -> String {
        format(self, pattern)
    }
}

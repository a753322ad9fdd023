//! Julian Day Number arithmetic for the Jalali calendar.
//!
//! Both directions use the 2820-year grand-cycle approximation of the Jalali
//! calendar: 33-year sub-cycles with eight leap years each, nested inside a
//! 2820-year cycle of 1 029 983 days. No leap-year table is involved.
//!
//! The JDN here is the integer chronological day number: the Unix epoch
//! (1970-01-01) is [`UNIX_EPOCH_JDN`].
//!
//! All divisions are floor divisions, so dates before the cycle epoch and
//! negative Jalali years come out right.

use crate::error::{CalendarError, Result};

/// Julian Day Number of 1970-01-01, the Unix epoch.
pub const UNIX_EPOCH_JDN: i64 = 2_440_588;

/// Number of milliseconds in a civil day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// JDN of 1 Farvardin 475, the first day of the grand cycle used as origin.
const GRAND_CYCLE_EPOCH_JDN: i64 = 2_121_446;

/// Days in one 2820-year grand cycle.
const DAYS_PER_GRAND_CYCLE: i64 = 1_029_983;

/// Years in one grand cycle.
const YEARS_PER_GRAND_CYCLE: i64 = 2820;

/// Grand cycles on either side of the origin that keep the year inside `i32`.
#[allow(clippy::cast_lossless)]
const MAX_GRAND_CYCLES: i64 = i32::MAX as i64 / YEARS_PER_GRAND_CYCLE;

/// JDN offset of the Jalali calendar epoch in the reverse formula.
const JALALI_EPOCH_OFFSET: i64 = 1_948_320;

/// Day of year on which Mehr (month 7) starts, minus one.
const FIRST_HALF_DAYS: i64 = 186;

/// Converts a Jalali date to its Julian Day Number.
///
/// Components are not validated: out-of-range months or days produce a
/// defined but meaningless day number.
///
/// ```rust
/// use andromeda_core::jdn::{jdn_from_jalali, UNIX_EPOCH_JDN};
///
/// assert_eq!(jdn_from_jalali(1348, 10, 11), UNIX_EPOCH_JDN);
/// ```
#[must_use]
pub fn jdn_from_jalali(year: i32, month: u32, day: u32) -> i64 {
    jdn_from_components(i64::from(year), month, day)
}

/// Converts a Julian Day Number to a Jalali `(year, month, day)` triple.
///
/// # Errors
///
/// Returns [`CalendarError::ArithmeticOverflow`] if the resulting year does not
/// fit in an `i32`.
///
/// ```rust
/// use andromeda_core::jdn::{jalali_from_jdn, UNIX_EPOCH_JDN};
///
/// assert_eq!(jalali_from_jdn(UNIX_EPOCH_JDN).unwrap(), (1348, 10, 11));
/// ```
pub fn jalali_from_jdn(jdn: i64) -> Result<(i32, u32, u32)> {
    let days_since_epoch = jdn
        .checked_sub(GRAND_CYCLE_EPOCH_JDN)
        .ok_or_else(|| CalendarError::overflow("julian day number below supported range"))?;

    let cycle = days_since_epoch.div_euclid(DAYS_PER_GRAND_CYCLE);
    if cycle.abs() > MAX_GRAND_CYCLES {
        return Err(CalendarError::overflow(format!(
            "julian day number {jdn} is outside the representable year range"
        )));
    }
    let day_in_cycle = days_since_epoch.rem_euclid(DAYS_PER_GRAND_CYCLE);

    let year_in_cycle = if day_in_cycle == DAYS_PER_GRAND_CYCLE - 1 {
        YEARS_PER_GRAND_CYCLE
    } else {
        let aux1 = day_in_cycle.div_euclid(366);
        let aux2 = day_in_cycle.rem_euclid(366);
        (2134 * aux1 + 2816 * aux2 + 2815).div_euclid(1_028_522) + aux1 + 1
    };

    let raw_year = year_in_cycle + YEARS_PER_GRAND_CYCLE * cycle + 474;
    // There is no year zero.
    let year = if raw_year > 0 { raw_year } else { raw_year - 1 };

    let day_of_year = jdn - jdn_from_components(year, 1, 1) + 1;

    let (month, day) = if day_of_year <= FIRST_HALF_DAYS {
        (
            (day_of_year - 1).div_euclid(31) + 1,
            (day_of_year - 1).rem_euclid(31) + 1,
        )
    } else {
        (
            (day_of_year - FIRST_HALF_DAYS - 1).div_euclid(30) + 7,
            (day_of_year - FIRST_HALF_DAYS - 1).rem_euclid(30) + 1,
        )
    };

    let year = i32::try_from(year)
        .map_err(|_| CalendarError::overflow(format!("jalali year {year} exceeds i32")))?;
    let month = u32::try_from(month)
        .map_err(|_| CalendarError::overflow(format!("jalali month {month} is negative")))?;
    let day = u32::try_from(day)
        .map_err(|_| CalendarError::overflow(format!("jalali day {day} is negative")))?;

    Ok((year, month, day))
}

/// Returns the year that follows `year`, skipping the nonexistent year zero.
pub(crate) const fn next_year(year: i64) -> i64 {
    if year == -1 {
        1
    } else {
        year + 1
    }
}

/// Reverse conversion on a widened year, shared with the leap-year helpers.
pub(crate) fn jdn_from_components(year: i64, month: u32, day: u32) -> i64 {
    let epoch_base = year - if year >= 0 { 474 } else { 473 };
    let epoch_year = 474 + epoch_base.rem_euclid(YEARS_PER_GRAND_CYCLE);

    let month = i64::from(month);
    let month_day_offset = if month <= 7 {
        (month - 1) * 31
    } else {
        (month - 1) * 30 + 6
    };

    i64::from(day)
        + month_day_offset
        + (epoch_year * 682 - 110).div_euclid(2816)
        + (epoch_year - 1) * 365
        + epoch_base.div_euclid(YEARS_PER_GRAND_CYCLE) * DAYS_PER_GRAND_CYCLE
        + JALALI_EPOCH_OFFSET
}

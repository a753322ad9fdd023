//! Iran Standard Time and the historical Iran daylight-saving rule.
//!
//! Iran Standard Time is UTC+03:30. Until Jalali year 1402, daylight saving
//! (UTC+04:30) applied from 2 Farvardin through the end of Shahrivar.
//!
//! Whether DST applies depends on the local Jalali date, which itself depends
//! on the offset. The rule breaks the cycle by always looking up the date at
//! the standard offset. That approximation is kept as is: the round trip
//! between timestamps and Jalali dates relies on both directions using it.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{CalendarError, Result};
use crate::jdn::{jalali_from_jdn, MILLIS_PER_DAY, UNIX_EPOCH_JDN};

/// Iran Standard Time offset (UTC+03:30) in milliseconds.
pub const IRAN_STANDARD_OFFSET_MILLIS: i64 = 12_600_000;

/// Iran daylight-saving offset (UTC+04:30) in milliseconds.
pub const IRAN_DAYLIGHT_OFFSET_MILLIS: i64 = 16_200_000;

/// First Jalali year in which Iran no longer observes daylight saving.
pub const DST_ABOLISHED_YEAR: i32 = 1402;

/// The UTC offset in force in Iran at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IranOffset {
    /// Iran Standard Time, UTC+03:30.
    Standard,
    /// Iran Daylight Time, UTC+04:30.
    Daylight,
}

impl IranOffset {
    /// Offset from UTC in milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        match self {
            Self::Standard => IRAN_STANDARD_OFFSET_MILLIS,
            Self::Daylight => IRAN_DAYLIGHT_OFFSET_MILLIS,
        }
    }

    /// Returns `true` for the daylight-saving offset.
    #[must_use]
    pub const fn is_daylight(self) -> bool {
        matches!(self, Self::Daylight)
    }

    /// Short time-zone abbreviation (`IRST` / `IRDT`).
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Standard => "IRST",
            Self::Daylight => "IRDT",
        }
    }
}

impl fmt::Display for IranOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.as_millis() / 60_000;
        write!(f, "+{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

/// Returns whether Iran daylight saving was in effect at the given UTC instant.
///
/// # Errors
///
/// Returns [`CalendarError::ArithmeticOverflow`] when the instant is too close
/// to the `i64` limits to apply the standard offset.
pub fn is_iran_daylight_saving(timestamp_millis: i64) -> Result<bool> {
    let local = timestamp_millis
        .checked_add(IRAN_STANDARD_OFFSET_MILLIS)
        .ok_or_else(|| CalendarError::overflow("applying the Iran standard offset"))?;
    let approx_jdn = local.div_euclid(MILLIS_PER_DAY) + UNIX_EPOCH_JDN;

    let (year, month, day) = jalali_from_jdn(approx_jdn)?;
    let observed = observes_daylight_saving(year, month, day);

    tracing::trace!(
        timestamp_millis,
        year,
        month,
        day,
        observed,
        "Resolved Iran daylight saving"
    );

    Ok(observed)
}

/// Resolves the offset in force in Iran at the given UTC instant.
///
/// # Errors
///
/// See [`is_iran_daylight_saving`].
pub fn iran_offset_at(timestamp_millis: i64) -> Result<IranOffset> {
    Ok(if is_iran_daylight_saving(timestamp_millis)? {
        IranOffset::Daylight
    } else {
        IranOffset::Standard
    })
}

/// The daylight-saving rule on a (preliminary) local Jalali date.
#[must_use]
pub const fn observes_daylight_saving(year: i32, month: u32, day: u32) -> bool {
    if year >= DST_ABOLISHED_YEAR {
        return false;
    }
    match month {
        2..=6 => true,
        1 => day > 1,
        _ => false,
    }
}

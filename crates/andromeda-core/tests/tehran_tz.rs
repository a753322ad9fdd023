//! Agreement with the IANA `Asia/Tehran` zone where both rules coincide.

use andromeda_core::{from_timestamp, iran_offset_at};
use chrono::{Offset, TimeZone, Timelike, Utc};
use chrono_tz::Asia::Tehran;

/// Mid-January and mid-July noon UTC for each Gregorian year.
fn mid_season_instants(years: std::ops::RangeInclusive<i32>) -> Vec<i64> {
    years
        .flat_map(|year| {
            [1, 7].map(|month| {
                Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0)
                    .unwrap()
                    .timestamp_millis()
            })
        })
        .collect()
}

fn assert_matches_tzdb(t: i64) {
    let zoned = Utc.timestamp_millis_opt(t).unwrap().with_timezone(&Tehran);
    let tzdb_offset_millis = i64::from(zoned.offset().fix().local_minus_utc()) * 1000;
    assert_eq!(iran_offset_at(t).unwrap().as_millis(), tzdb_offset_millis, "offset at {t}");

    let local = from_timestamp(t).unwrap();
    assert_eq!((local.hour, local.minute), (zoned.hour(), zoned.minute()), "wall clock at {t}");
}

#[test]
fn agrees_with_tzdb_during_observed_daylight_saving_years() {
    // Iran skipped daylight saving in 2006 and 2007.
    for t in mid_season_instants(2008..=2022) {
        assert_matches_tzdb(t);
    }
}

#[test]
fn agrees_with_tzdb_after_abolition() {
    for t in mid_season_instants(2023..=2040) {
        assert_matches_tzdb(t);
    }
    let start_of_1402 = Utc.with_ymd_and_hms(2023, 3, 21, 0, 0, 0).unwrap();
    for day in 0..400 {
        assert_matches_tzdb(start_of_1402.timestamp_millis() + day * 86_400_000);
    }
}

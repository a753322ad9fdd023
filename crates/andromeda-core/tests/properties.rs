//! Calendar-wide properties of the converter.

use andromeda_core::{
    format, from_timestamp, is_iran_daylight_saving, jalali_from_jdn, jdn_from_jalali, parse,
    to_timestamp, PersianDateTime, DEFAULT_DATE_PATTERN, DEFAULT_DATE_TIME_PATTERN,
};

const HOUR: i64 = 3_600_000;
const DAY: i64 = 86_400_000;

/// Instants inside the last daylight hour of a season share their wall-clock
/// reading with the following standard hour.
fn in_repeated_hour(t: i64) -> bool {
    is_iran_daylight_saving(t).unwrap() && !is_iran_daylight_saving(t + HOUR).unwrap()
}

#[test]
fn round_trip_over_wide_range() {
    // 1906 to 2096, with an odd step so times of day and milliseconds vary.
    let mut checked = 0;
    for t in (-2_000_000_000_000_i64..4_000_000_000_000).step_by(1_000_003_331) {
        if in_repeated_hour(t) {
            continue;
        }
        let dt = from_timestamp(t).unwrap();
        assert_eq!(to_timestamp(&dt).unwrap(), t, "round trip of {t} via {dt:?}");
        checked += 1;
    }
    assert!(checked > 5_000);
}

#[test]
fn round_trip_around_every_transition() {
    for year in 1360..=1405 {
        for (month, day) in [(1, 2), (7, 1), (1, 1)] {
            let local_midnight = to_timestamp(&PersianDateTime::date(year, month, day).unwrap())
                .unwrap();
            for minutes in -180..180 {
                let t = local_midnight + minutes * 60_000 + 17;
                if in_repeated_hour(t) {
                    continue;
                }
                let dt = from_timestamp(t).unwrap();
                assert_eq!(to_timestamp(&dt).unwrap(), t, "round trip of {t} via {dt:?}");
            }
        }
    }
}

#[test]
fn jdn_is_inverse_for_years_1_to_1500() {
    for year in 1..=1500 {
        for month in 1..=12 {
            let days = andromeda_core::days_in_month(year, month).unwrap();
            for day in 1..=days {
                let jdn = jdn_from_jalali(year, month, day);
                assert_eq!(jalali_from_jdn(jdn).unwrap(), (year, month, day));
            }
        }
    }
}

#[test]
fn consecutive_days_have_consecutive_jdns() {
    let mut expected = jdn_from_jalali(1300, 1, 1);
    for year in 1300..=1500 {
        for month in 1..=12 {
            for day in 1..=andromeda_core::days_in_month(year, month).unwrap() {
                assert_eq!(jdn_from_jalali(year, month, day), expected);
                expected += 1;
            }
        }
    }
}

#[test]
fn unix_epoch_is_11_dey_1348() {
    let dt = from_timestamp(0).unwrap();
    assert_eq!(dt, PersianDateTime::new(1348, 10, 11, 3, 30, 0).unwrap());
}

#[test]
fn daylight_saving_ends_with_1401() {
    let summer_1401 = to_timestamp(&PersianDateTime::new(1401, 3, 15, 12, 0, 0).unwrap()).unwrap();
    let summer_1402 = to_timestamp(&PersianDateTime::new(1402, 3, 15, 12, 0, 0).unwrap()).unwrap();
    assert!(is_iran_daylight_saving(summer_1401).unwrap());
    assert!(!is_iran_daylight_saving(summer_1402).unwrap());
    // Noon moved from UTC+04:30 to UTC+03:30, so one extra hour elapsed.
    assert_eq!(summer_1402 - summer_1401, 365 * DAY + HOUR);
}

#[test]
fn default_date_format_is_fixed_width() {
    for t in (0_i64..2_000_000_000_000).step_by(9_876_543_211) {
        let text = format(&from_timestamp(t).unwrap(), DEFAULT_DATE_PATTERN);
        assert_eq!(text.len(), 10, "{text}");
        assert!(text
            .chars()
            .enumerate()
            .all(|(i, c)| if i == 4 || i == 7 { c == '/' } else { c.is_ascii_digit() }));
    }
}

#[test]
fn plus_then_minus_days_is_identity() {
    let mut date = PersianDateTime::date(1395, 1, 1).unwrap();
    for _ in 0..800 {
        assert_eq!(date.plus_days(1).unwrap().minus_days(1).unwrap(), date);
        date = date.plus_days(1).unwrap();
    }
}

#[test]
fn days_until_is_antisymmetric() {
    let anchors = [
        PersianDateTime::new(1348, 10, 11, 3, 30, 0).unwrap(),
        PersianDateTime::new(1390, 6, 31, 23, 0, 0).unwrap(),
        PersianDateTime::new(1404, 12, 30, 0, 0, 0).unwrap(),
    ];
    for a in &anchors {
        for b in &anchors {
            assert_eq!(a.days_until(b), -b.days_until(a));
        }
    }
    assert_eq!(anchors[0].days_until(&anchors[0]), 0);
}

#[test]
fn parse_inverts_format() {
    let patterns = [
        DEFAULT_DATE_TIME_PATTERN,
        "dd-MM-yyyy HH:mm:ss",
        "yyyyMMddHHmmss",
        "[HH:mm:ss] yyyy.MM.dd",
    ];
    for t in (-500_000_000_000_i64..2_000_000_000_000).step_by(77_777_777_777) {
        let dt = from_timestamp(t).unwrap().with_millisecond(0);
        for pattern in patterns {
            let text = format(&dt, pattern);
            assert_eq!(parse(&text, pattern).unwrap(), dt, "{pattern}: {text}");
        }
    }
}

#[test]
fn validation_bounds() {
    assert!(PersianDateTime::date(1404, 13, 1).is_err());
    assert!(PersianDateTime::date(1404, 1, 32).is_err());
    assert!(PersianDateTime::date(1403, 12, 30).is_err());
    assert!(PersianDateTime::date(1404, 12, 30).is_ok());
}

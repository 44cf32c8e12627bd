//! Calendar arithmetic for DATE, TIME and TIMESTAMP.
//!
//! Dates travel as a signed day count from 1858-11-17 (the Modified Julian
//! Day epoch); times as ticks of 1/10000 second since midnight. All divisions
//! are floor divisions so dates before the epoch convert correctly.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::TypeError;

/// Offset between the Firebird day count and the internal Julian base.
const DAY_OFFSET: i64 = 678_882;

/// Time ticks per second.
pub const TICKS_PER_SECOND: u32 = 10_000;

/// Convert a day count to a calendar date.
pub fn decode_date(days: i32) -> Result<NaiveDate, TypeError> {
    let mut nday = i64::from(days) + DAY_OFFSET;
    let century = (4 * nday - 1).div_euclid(146_097);
    nday = 4 * nday - 1 - 146_097 * century;
    let mut day = nday.div_euclid(4);

    nday = (4 * day + 3).div_euclid(1461);
    day = 4 * day + 3 - 1461 * nday;
    day = (day + 4).div_euclid(4);

    let mut month = (5 * day - 3).div_euclid(153);
    day = 5 * day - 3 - 153 * month;
    day = (day + 5).div_euclid(5);
    let mut year = 100 * century + nday;

    if month < 10 {
        month += 3;
    } else {
        month -= 9;
        year += 1;
    }

    let invalid = || TypeError::InvalidDateTime(format!("day count {days} is out of range"));
    let year = i32::try_from(year).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or_else(invalid)
}

/// Convert a calendar date to a day count.
pub fn encode_date(date: NaiveDate) -> Result<i32, TypeError> {
    let i = i64::from(date.month()) + 9;
    let mut jy = i64::from(date.year()) + i.div_euclid(12) - 1;
    let jm = i.rem_euclid(12);
    let c = jy.div_euclid(100);
    jy -= 100 * c;
    let days = (146_097 * c).div_euclid(4) + (1461 * jy).div_euclid(4) + (153 * jm + 2).div_euclid(5)
        + i64::from(date.day())
        - DAY_OFFSET;
    i32::try_from(days).map_err(|_| TypeError::OutOfRange { target_type: "DATE" })
}

/// Convert ticks since midnight to a time of day.
pub fn decode_time(ticks: u32) -> Result<NaiveTime, TypeError> {
    let seconds = ticks / TICKS_PER_SECOND;
    let micros = (ticks % TICKS_PER_SECOND) * 100;
    let (h, m, s) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
    NaiveTime::from_hms_micro_opt(h, m, s, micros)
        .ok_or_else(|| TypeError::InvalidDateTime(format!("time ticks {ticks} are out of range")))
}

/// Convert a time of day to ticks since midnight.
///
/// Precision below 100 microseconds is dropped.
#[must_use]
pub fn encode_time(time: NaiveTime) -> u32 {
    // Leap-second nanoseconds (>= 1e9) are clamped into the last tick.
    let fraction = time.nanosecond().min(999_999_999) / 100_000;
    time.num_seconds_from_midnight() * TICKS_PER_SECOND + fraction
}

/// Convert a date field and a time field to a timestamp.
pub fn decode_timestamp(days: i32, ticks: u32) -> Result<NaiveDateTime, TypeError> {
    Ok(decode_date(days)?.and_time(decode_time(ticks)?))
}

/// Convert a timestamp to its date and time fields.
pub fn encode_timestamp(value: NaiveDateTime) -> Result<(i32, u32), TypeError> {
    Ok((encode_date(value.date())?, encode_time(value.time())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_day_counts() {
        assert_eq!(decode_date(50448).unwrap(), date(1996, 12, 31));
        assert_eq!(encode_date(date(1996, 12, 31)).unwrap(), 50448);
        assert_eq!(decode_date(0).unwrap(), date(1858, 11, 17));
        assert_eq!(encode_date(date(2000, 1, 1)).unwrap(), 51544);
        assert_eq!(decode_date(51544).unwrap(), date(2000, 1, 1));
    }

    #[test]
    fn test_dates_before_epoch() {
        assert_eq!(decode_date(-1).unwrap(), date(1858, 11, 16));
        assert_eq!(encode_date(date(1800, 3, 1)).unwrap(), -21_445);
    }

    #[test]
    fn test_time_ticks() {
        let t = decode_time(452_961_234).unwrap();
        assert_eq!(t, NaiveTime::from_hms_micro_opt(12, 34, 56, 123_400).unwrap());
        assert_eq!(encode_time(t), 452_961_234);
        assert_eq!(decode_time(0).unwrap(), NaiveTime::MIN);
    }

    #[test]
    fn test_time_out_of_range() {
        assert!(decode_time(24 * 3600 * TICKS_PER_SECOND).is_err());
    }

    #[test]
    fn test_timestamp() {
        let ts = decode_timestamp(50448, 36_000_000).unwrap();
        assert_eq!(ts, date(1996, 12, 31).and_hms_opt(1, 0, 0).unwrap());
        assert_eq!(encode_timestamp(ts).unwrap(), (50448, 36_000_000));
    }

    proptest! {
        #[test]
        fn prop_date_round_trip(days in -600_000i32..2_000_000) {
            let date = decode_date(days).unwrap();
            prop_assert_eq!(encode_date(date).unwrap(), days);
        }

        #[test]
        fn prop_time_round_trip(ticks in 0u32..(24 * 3600 * TICKS_PER_SECOND)) {
            let time = decode_time(ticks).unwrap();
            prop_assert_eq!(encode_time(time), ticks);
        }
    }
}

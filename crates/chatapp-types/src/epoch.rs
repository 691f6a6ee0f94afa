//! Date-times on the wire are floating-point seconds since
//! 1970-01-01T00:00:00, measured on the naive (timezone-free) clock.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Seconds since the Unix epoch with microsecond precision.
pub fn epoch_seconds(at: NaiveDateTime) -> f64 {
    at.and_utc().timestamp_micros() as f64 / 1_000_000.0
}

/// Inverse of [`epoch_seconds`]. Returns `None` for values chrono cannot represent.
pub fn from_epoch_seconds(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::<Utc>::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_milli_opt(h, min, s, ms)
            .unwrap()
    }

    #[test]
    fn epoch_itself_is_zero() {
        assert_eq!(epoch_seconds(at(1970, 1, 1, 0, 0, 0, 0)), 0.0);
    }

    #[test]
    fn keeps_sub_second_precision() {
        let created = at(2014, 2, 16, 1, 42, 39, 828);
        let seconds = epoch_seconds(created);
        assert!((seconds - 1392514959.828).abs() < 1e-6);
    }

    #[test]
    fn decoding_recovers_the_original_value() {
        let created = at(2014, 2, 17, 6, 41, 8, 497);
        let decoded = from_epoch_seconds(epoch_seconds(created)).unwrap();
        let drift = (decoded - created).num_microseconds().unwrap().abs();
        assert!(drift < 1_000, "drifted {drift}us");
    }

    #[test]
    fn dates_before_the_epoch_are_negative() {
        let seconds = epoch_seconds(at(1969, 12, 31, 23, 59, 59, 500));
        assert!((seconds + 0.5).abs() < 1e-9);
        assert_eq!(
            from_epoch_seconds(seconds).unwrap(),
            at(1969, 12, 31, 23, 59, 59, 500)
        );
    }

    #[test]
    fn non_finite_values_do_not_decode() {
        assert!(from_epoch_seconds(f64::NAN).is_none());
        assert!(from_epoch_seconds(f64::INFINITY).is_none());
    }
}

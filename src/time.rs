use chrono::{Duration, NaiveDateTime};

/// Convert fractional minutes to a `Duration`, rounded to the millisecond
#[must_use]
pub fn minutes_to_duration(minutes: f64) -> Duration {
    // Timetable offsets stay far below the i64 millisecond range
    #[allow(clippy::cast_possible_truncation)]
    let millis = (minutes * 60_000.0).round() as i64;
    Duration::milliseconds(millis)
}

/// Minutes elapsed from `start` to `end`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    // Break down to whole seconds plus milliseconds to avoid precision loss
    let delta = end.signed_duration_since(start);
    let seconds = delta.num_seconds();
    let millis = delta.num_milliseconds() - seconds * 1000;
    seconds as f64 / 60.0 + millis as f64 / 60_000.0
}

/// Parse an ISO-8601 local date-time such as `2025-09-19T08:00:00`
///
/// # Errors
///
/// Returns an error if the string is not a date-time in that format.
pub fn parse_start_time(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    s.trim().parse::<NaiveDateTime>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASE_DATE, DEFAULT_START_TIME};

    #[test]
    fn test_minutes_to_duration_whole() {
        assert_eq!(minutes_to_duration(5.0), Duration::minutes(5));
    }

    #[test]
    fn test_minutes_to_duration_fractional() {
        assert_eq!(minutes_to_duration(1.5), Duration::seconds(90));
        assert_eq!(minutes_to_duration(0.0), Duration::zero());
    }

    #[test]
    fn test_minutes_between() {
        let start = BASE_DATE.and_hms_opt(8, 0, 0).expect("valid time");
        let end = BASE_DATE.and_hms_opt(8, 12, 30).expect("valid time");
        assert_eq!(minutes_between(start, end), 12.5);
        assert_eq!(minutes_between(end, start), -12.5);
    }

    #[test]
    fn test_parse_start_time() {
        let parsed = parse_start_time("2025-09-19T08:00:00").expect("valid start");
        assert_eq!(parsed, DEFAULT_START_TIME);
        assert!(parse_start_time("08:00").is_err());
    }
}

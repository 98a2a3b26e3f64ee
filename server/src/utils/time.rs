//! Time utility functions

use chrono::{DateTime, Utc};

/// Current time as microseconds since Unix epoch (storage format)
pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

/// Convert microseconds since Unix epoch to DateTime<Utc>
pub fn micros_to_datetime(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_else(|| {
        tracing::warn!(micros, "Invalid timestamp, using epoch");
        DateTime::UNIX_EPOCH
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_micros_round_trip() {
        let now = now_micros();
        assert_eq!(micros_to_datetime(now).timestamp_micros(), now);
    }

    #[test]
    fn test_micros_to_datetime_epoch() {
        assert_eq!(micros_to_datetime(0), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_micros_to_datetime_out_of_range() {
        assert_eq!(micros_to_datetime(i64::MAX), DateTime::UNIX_EPOCH);
    }
}

use chrono::{DateTime, Utc};

/// DateTime<Utc> to a millisecond unix timestamp, as stored in MySQL
pub fn datetime_to_millis(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Millisecond unix timestamp back to DateTime<Utc>
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
}

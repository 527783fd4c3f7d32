use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};

/// Calendar day in the device's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Clock time for user-facing messages, e.g. "09:00 AM".
pub fn format_time(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%I:%M %p")
        .to_string()
}

/// Worked-time label, e.g. "8h 30m". Sub-minute remainders are dropped.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

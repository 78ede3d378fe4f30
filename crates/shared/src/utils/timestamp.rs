use chrono::{DateTime, Local, TimeZone};

/// Month-day-year, 24 hour clock.
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

pub fn format_timestamp<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Weekday};

/// Git's RFC-2822 date layout, as accepted by `GIT_AUTHOR_DATE`.
pub const GIT_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

pub fn git_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format(GIT_DATE_FORMAT).to_string()
}

pub fn month_key(timestamp: &DateTime<FixedOffset>) -> String {
    format!("{}-{:02}", timestamp.year(), timestamp.month())
}

pub fn day_key(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn bar(count: usize) -> String {
    "█".repeat(count)
}

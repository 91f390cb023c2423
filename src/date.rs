use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// Local wall-clock time; falls back to UTC when the local offset can't be determined.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `YYYYMMDD_HHMMSS`, the suffix shared by every file written in one run.
pub fn format_run_timestamp(dt: OffsetDateTime) -> String {
    dt.format(format_description!("[year][month][day]_[hour][minute][second]"))
        .unwrap_or_else(|_| dt.unix_timestamp().to_string())
}

pub fn run_timestamp() -> String {
    format_run_timestamp(now_local())
}

/// Parse an API timestamp such as `2024-01-01T00:00:00Z`.
pub fn parse_timestamp(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s.trim(), &Rfc3339).ok()
}

/// Calendar date of a timestamp, taken in UTC.
pub fn utc_date(s: &str) -> Option<Date> {
    parse_timestamp(s).map(|dt| dt.to_offset(UtcOffset::UTC).date())
}

/// Parse a `YYYY-MM-DD` date bound.
pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]")).ok()
}

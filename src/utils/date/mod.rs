// Date utility functions
// Parsing and formatting of local wall-clock timestamps at minute precision

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Format used by datetime-local form fields.
pub const FIELD_FORMAT: &str = "%Y-%m-%dT%H:%M";

// `%.f` also matches when no fraction is present.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Parse a field value into a local wall-clock timestamp truncated to the minute.
///
/// Accepts the datetime-local forms (with or without seconds and fractional
/// seconds, `T` or space separated), timestamps with a `Z` or numeric offset
/// with or without seconds (converted to local time) and bare dates (local
/// midnight). Returns `None` for anything else.
pub fn parse_local(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let parsed = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| parse_with_offset(value))
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    truncate_to_minute(parsed)
}

fn parse_with_offset(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc, "%Y-%m-%dT%H:%M").ok()?;
        return Some(Utc.from_utc_datetime(&naive).with_timezone(&Local).naive_local());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Render a timestamp the way datetime-local fields expect it.
pub fn format_local(value: NaiveDateTime) -> String {
    value.format(FIELD_FORMAT).to_string()
}

pub fn truncate_to_minute(value: NaiveDateTime) -> Option<NaiveDateTime> {
    value.with_second(0)?.with_nanosecond(0)
}

use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Month identifier parsing
// ---------------------------------------------------------------------------

/// Layouts that carry a full calendar date.  Slash dates are read
/// month-first; day-first is only tried when that cannot succeed.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Layouts with a year and month only.  A day is appended before parsing
/// because `NaiveDate` cannot be built from a partial date.
const YEAR_MONTH_FORMATS: &[&str] = &[
    "%Y-%m", "%Y/%m", "%Y.%m", "%B %Y", "%Y %B", "%B-%Y", "%Y-%B",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date-like month identifier and normalise it to the first day of
/// its month.  Returns `None` when no known layout matches.
///
/// `%B` also accepts abbreviated names, so "Jan 1949" and "January 1949"
/// both parse.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let date = YEAR_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&format!("{s}|1"), &format!("{fmt}|%d")).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))?;

    date.with_day(1)
}

/// English month name for a 1-based month number.
pub fn month_name(month_number: u32) -> Option<&'static str> {
    u8::try_from(month_number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name())
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Zone-less timestamp shapes written by the document store.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Render a stored date as `DD/MM/YYYY`, independent of host locale.
///
/// Accepts RFC 3339 timestamps (taken as their UTC calendar date), zone-less
/// timestamps (taken as written) and bare `YYYY-MM-DD` dates. Anything else
/// is shown exactly as stored.
pub fn format_display_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return format_date(ts.with_timezone(&Utc).date_naive());
    }
    if let Some(ts) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return format_date(ts.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format_date(date);
    }
    raw.to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Optional variant used for payload fields; absent dates render empty.
pub fn format_optional_date(raw: Option<&str>) -> String {
    raw.map(format_display_date).unwrap_or_default()
}

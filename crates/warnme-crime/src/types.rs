//! Crime incident records and field parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use warnme_geocode::Coordinates;

/// One row of an incident table.
///
/// Source tables are messy; rows with an unparseable location or
/// timestamp keep `None` in that field and are skipped by queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrimeRecord {
    pub offense: String,
    pub location: Option<Coordinates>,
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Parse a `"lat,lon"` pair, latitude first.
///
/// Splits on the first comma only, so trailing junk after the longitude
/// makes the whole field unparseable rather than being silently ignored.
pub fn parse_lat_lon(input: &str) -> Option<Coordinates> {
    let (lat, lon) = input.split_once(',')?;
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lon.trim().parse::<f64>().ok()?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse an incident timestamp.
///
/// Tries RFC 3339 first, then the datetime and date-only formats that
/// show up in published incident tables. Date-only values resolve to
/// midnight UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Some(parsed.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(input, format) {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

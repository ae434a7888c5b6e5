//! Incident table ingestion.

use std::io::Read;

use crate::error::CrimeDataError;
use crate::types::{parse_lat_lon, parse_timestamp, CrimeRecord};

/// Columns of interest in an incident CSV file.
///
/// Published incident tables differ in header naming, so the caller names
/// the columns instead of this crate guessing them.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub offense: String,
    pub lat_lon: String,
    pub date: String,
}

/// Read incident records from CSV data.
///
/// Rows survive ingestion even when their location or timestamp does not
/// parse; those fields become `None` and queries skip them. A header
/// missing one of the named columns is an error.
pub fn records_from_csv<R: Read>(
    reader: R,
    columns: &ColumnSpec,
) -> Result<Vec<CrimeRecord>, CrimeDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let offense_idx = column_index(&headers, &columns.offense)?;
    let lat_lon_idx = column_index(&headers, &columns.lat_lon)?;
    let date_idx = column_index(&headers, &columns.date)?;

    let mut records = Vec::new();
    let mut unlocated = 0usize;

    for row in csv_reader.records() {
        let row = row?;

        let offense = row.get(offense_idx).unwrap_or_default().to_string();
        let location = row.get(lat_lon_idx).and_then(parse_lat_lon);
        let occurred_at = row.get(date_idx).and_then(parse_timestamp);

        if location.is_none() {
            unlocated += 1;
        }

        records.push(CrimeRecord {
            offense,
            location,
            occurred_at,
        });
    }

    tracing::debug!(
        "Loaded {} incident records ({} without usable coordinates)",
        records.len(),
        unlocated
    );
    Ok(records)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, CrimeDataError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| CrimeDataError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    const SAMPLE: &str = "\
OFFENSE,Block_Location,EVENTDT
BURGLARY,\"37.8716, -122.2727\",2024-03-01 12:30:00
THEFT,\"37.8650, -122.2590\",03/02/2024
VANDALISM,not a location,2024-03-03 09:00:00
ASSAULT,\"37.8700, -122.2700\",unknown date
";

    fn sample_columns() -> ColumnSpec {
        ColumnSpec {
            offense: "OFFENSE".to_string(),
            lat_lon: "Block_Location".to_string(),
            date: "EVENTDT".to_string(),
        }
    }

    #[test]
    fn test_records_from_csv() {
        let records = records_from_csv(SAMPLE.as_bytes(), &sample_columns()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].offense, "BURGLARY");
        assert_eq!(records[0].location.unwrap().latitude, 37.8716);
        assert!(records[0].occurred_at.is_some());
    }

    #[test]
    fn test_unparseable_fields_become_none() {
        let records = records_from_csv(SAMPLE.as_bytes(), &sample_columns()).unwrap();

        assert!(records[2].location.is_none());
        assert!(records[2].occurred_at.is_some());
        assert!(records[3].location.is_some());
        assert!(records[3].occurred_at.is_none());
    }

    #[test]
    fn test_missing_column_is_error() {
        let mut columns = sample_columns();
        columns.lat_lon = "LatLon".to_string();
        let result = records_from_csv(SAMPLE.as_bytes(), &columns);

        assert!(matches!(
            result,
            Err(CrimeDataError::MissingColumn(name)) if name == "LatLon"
        ));
    }
}

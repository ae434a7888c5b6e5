//! Crime frequency near a point within a time window.

use chrono::{DateTime, Utc};
use warnme_geocode::Coordinates;

use crate::types::CrimeRecord;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_distance_m(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// A "how much crime happened near here" question.
#[derive(Debug, Clone)]
pub struct FrequencyQuery {
    pub center: Coordinates,
    pub radius_m: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Records within `radius_m` of the center whose timestamp falls in
/// `start..=end` (both ends inclusive). The count is the returned length.
///
/// Records without a usable location or timestamp never match.
pub fn crime_frequency<'a>(
    records: &'a [CrimeRecord],
    query: &FrequencyQuery,
) -> Vec<&'a CrimeRecord> {
    records
        .iter()
        .filter(|record| {
            let (Some(location), Some(occurred_at)) = (record.location, record.occurred_at)
            else {
                return false;
            };

            haversine_distance_m(&query.center, &location) <= query.radius_m
                && (query.start..=query.end).contains(&occurred_at)
        })
        .collect()
}

//! Crime incident analysis for WarnMe.
//!
//! Loads published incident tables and answers "how many incidents
//! happened within this radius during this window" queries.

pub mod error;
pub mod frequency;
pub mod import;
pub mod types;

pub use error::CrimeDataError;
pub use frequency::{crime_frequency, haversine_distance_m, FrequencyQuery};
pub use import::{records_from_csv, ColumnSpec};
pub use types::{parse_lat_lon, parse_timestamp, CrimeRecord};

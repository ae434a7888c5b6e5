//! Address geocoding for WarnMe.
//!
//! Turns a free-text street address into a `"<lat>,<lng>"` coordinate
//! string via the Google Maps Geocoding API.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use types::{Address, Coordinates, Resolution, NOT_FOUND};

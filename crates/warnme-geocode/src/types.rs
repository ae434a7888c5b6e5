//! Geocoding types and provider response structures.

use serde::{Deserialize, Serialize};

/// Cell value returned when the provider has no candidate for an address.
pub const NOT_FOUND: &str = "Not found";

/// A latitude/longitude pair.
///
/// `Display` renders latitude and longitude joined by a comma, latitude
/// first, no surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A non-empty address query.
///
/// Blank input (empty or whitespace-only) has no `Address` value, so the
/// "nothing to look up" case is handled before any provider call. The
/// inner string is kept exactly as given; the provider does its own
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Address(String);

impl Address {
    pub fn new(input: &str) -> Option<Self> {
        if input.trim().is_empty() {
            None
        } else {
            Some(Self(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of a provider lookup for one address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The provider's first candidate.
    Found(Coordinates),
    /// The provider answered but had no usable candidate.
    NoMatch,
}

/// Provider response structure.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

//! Geocoding provider client.

use std::time::Duration;

use tracing::instrument;

use crate::error::GeocodeError;
use crate::types::*;

const GEOCODE_API_BASE: &str = "https://maps.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct GeocodeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(api_key: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: GEOCODE_API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Look up an address with the provider.
    ///
    /// Provider-reported misses (a non-`OK` status, or `OK` with an empty
    /// candidate list) are `Resolution::NoMatch`; only transport-level
    /// failures are errors.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, address: &Address) -> Result<Resolution, GeocodeError> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("address", address.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GeocodeError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        if body.status == "OK" {
            if let Some(first) = body.results.first() {
                let location = &first.geometry.location;
                return Ok(Resolution::Found(Coordinates {
                    latitude: location.lat,
                    longitude: location.lng,
                }));
            }
        }

        tracing::debug!("No geocoding candidate (provider status {})", body.status);
        Ok(Resolution::NoMatch)
    }

    /// Geocode a free-text address into a `"<lat>,<lng>"` string.
    ///
    /// Blank input returns an empty string without contacting the provider.
    /// An address the provider cannot place returns `"Not found"`. The
    /// coordinate string uses the first candidate, latitude first.
    pub async fn geocode(&self, address: &str) -> Result<String, GeocodeError> {
        let Some(address) = Address::new(address) else {
            return Ok(String::new());
        };

        match self.resolve(&address).await? {
            Resolution::Found(coordinates) => Ok(coordinates.to_string()),
            Resolution::NoMatch => Ok(NOT_FOUND.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate(lat: f64, lng: f64) -> serde_json::Value {
        serde_json::json!({"geometry": {"location": {"lat": lat, "lng": lng}}})
    }

    #[tokio::test]
    async fn test_geocode_returns_first_candidate() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "2180 Milvia St, Berkeley, CA"))
            .and(query_param("key", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [candidate(37.8716, -122.2727), candidate(37.0, -122.0)]
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri());
        let result = client.geocode("2180 Milvia St, Berkeley, CA").await.unwrap();

        assert_eq!(result, "37.8716,-122.2727");
    }

    #[tokio::test]
    async fn test_blank_input_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri());

        assert_eq!(client.geocode("").await.unwrap(), "");
        assert_eq!(client.geocode("   ").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_zero_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ZERO_RESULTS",
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri());
        let result = client.geocode("Nonexistent Place XYZ123").await.unwrap();

        assert_eq!(result, "Not found");
    }

    #[tokio::test]
    async fn test_ok_status_without_candidates_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri());
        let result = client.geocode("1 Some St").await.unwrap();

        assert_eq!(result, "Not found");
    }

    #[tokio::test]
    async fn test_denied_status_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "REQUEST_DENIED",
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("bad_key", &mock_server.uri());
        let result = client.geocode("2180 Milvia St").await.unwrap();

        assert_eq!(result, "Not found");
    }

    #[tokio::test]
    async fn test_repeated_lookup_same_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [candidate(37.8716, -122.2727)]
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri());
        let first = client.geocode("2180 Milvia St").await.unwrap();
        let second = client.geocode("2180 Milvia St").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_server_error_is_propagated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri());
        let result = client.geocode("2180 Milvia St").await;

        assert!(matches!(
            result,
            Err(GeocodeError::ApiError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new_with_base_url("test_key", &mock_server.uri());
        let result = client.geocode("2180 Milvia St").await;

        assert!(matches!(result, Err(GeocodeError::InvalidResponse(_))));
    }
}

//! Geocoding-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoding API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl GeocodeError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { status, .. } if *status >= 500 => {
                "The geocoding service is experiencing issues. Please try again later.".to_string()
            }
            Self::ApiError { .. } => "Address lookup failed. Please try again.".to_string(),
            Self::InvalidResponse(_) => {
                "The geocoding service returned an unexpected response.".to_string()
            }
            Self::NetworkError(_) => "Network error. Check your connection.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = GeocodeError::ApiError {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.user_message().contains("later"));

        let err = GeocodeError::InvalidResponse("bad json".into());
        assert!(err.user_message().contains("unexpected"));
    }
}

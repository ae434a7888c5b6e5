//! Mailbox-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Token expired")]
    TokenExpired,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl MailError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired => "Please sign in to your Google account".to_string(),
            Self::TokenExpired => "Your session has expired. Please sign in again.".to_string(),
            Self::RateLimited(secs) => format!("Too many requests. Please wait {} seconds.", secs),
            Self::MessageNotFound(_) => "Message not found".to_string(),
            Self::ApiError(msg) => format!("Gmail error: {}", msg),
            Self::Csv(_) | Self::Io(_) => "Failed to write the export file.".to_string(),
            Self::NetworkError(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::NetworkError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = MailError::AuthRequired;
        assert!(err.user_message().contains("sign in"));

        let err = MailError::RateLimited(30);
        assert!(err.user_message().contains("30"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(MailError::RateLimited(10).is_retryable());
        assert!(!MailError::MessageNotFound("x".into()).is_retryable());
    }
}

//! Error types for the open-meteo crate.

use thiserror::Error;

/// Errors that can occur when calling the forecast API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// Too many requests. Retry after the given delay, if provided.
    #[error("Rate limited by Open-Meteo{}", retry_after.as_ref().map(|r| format!(" (retry after {r})")).unwrap_or_default())]
    RateLimited {
        /// Value of the `Retry-After` header, if present.
        retry_after: Option<String>,
    },

    /// The server returned a 5xx status.
    #[error("Open-Meteo server error: HTTP {0}")]
    Server(u16),

    /// The server returned a status this client does not handle.
    #[error("Unexpected HTTP status: {0}")]
    Unexpected(u16),

    /// The response body was not the expected JSON shape.
    #[error("Failed to parse forecast response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_display_includes_retry_after() {
        let err = ApiError::RateLimited {
            retry_after: Some("60".to_string()),
        };
        assert_eq!(err.to_string(), "Rate limited by Open-Meteo (retry after 60)");
    }

    #[test]
    fn rate_limited_display_without_retry_after() {
        let err = ApiError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limited by Open-Meteo");
    }

    #[test]
    fn server_error_display_includes_status() {
        assert!(ApiError::Server(503).to_string().contains("503"));
    }
}

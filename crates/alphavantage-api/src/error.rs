//! Error types for the Alpha Vantage client.

use thiserror::Error;

/// Result type alias for Alpha Vantage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Alpha Vantage client.
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration, such as the API key, is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The response did not carry a daily series. The service signals unknown
    /// tickers, bad parameters and outages the same way.
    #[error("invalid API call, check that ticker symbol {ticker} is correct")]
    InvalidQuery {
        /// Ticker the request was made for.
        ticker: String,
    },
    /// The daily series was present but could not be normalized.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    /// Invalid parameter provided by the caller.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error means the service rejected the query.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Error::InvalidQuery { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_message_names_ticker() {
        let err = Error::InvalidQuery {
            ticker: "NOPE".into(),
        };
        assert!(err.is_invalid_query());
        assert_eq!(
            err.to_string(),
            "invalid API call, check that ticker symbol NOPE is correct"
        );
    }
}

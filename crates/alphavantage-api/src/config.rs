//! Configuration for the Alpha Vantage client.

/// Configuration for the Alpha Vantage client.
///
/// The API key is not part of this struct; it is handed to
/// [`crate::AlphaVantageClient`] directly and kept private there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL the `/query` path is appended to.
    pub base_url: String,
    /// User agent string.
    pub user_agent: String,
    /// Ignore proxy settings from the environment.
    pub no_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            user_agent: format!("alphavantage-api-rust/{}", crate::VERSION),
            no_proxy: false,
        }
    }
}

impl Config {
    /// Set the base URL. A trailing slash is ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Connect directly, bypassing any system proxy.
    pub fn with_no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Full URL of the query endpoint.
    pub fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.base_url, crate::DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("alphavantage-api-rust/"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.query_url(), "http://127.0.0.1:9000/query");
    }
}

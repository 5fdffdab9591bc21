//! Blocking HTTP client for the Alpha Vantage query endpoint.

use equity_core::{DailySource, OutputSize, TimeSeriesTable};
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use std::fmt;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::parse_daily_series;

/// Client for the `TIME_SERIES_DAILY` endpoint.
///
/// The API key is stored privately and never exposed after construction.
#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    config: Config,
    http: Client,
}

impl fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl AlphaVantageClient {
    /// Create a client with the default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, Config::default())
    }

    /// Create a client with the given configuration.
    ///
    /// Fails with [`Error::Configuration`] if the key is empty.
    pub fn with_config(api_key: impl Into<String>, config: Config) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Configuration("Alpha Vantage API key not found".into()));
        }

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            api_key,
            config,
            http,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the request URL for a daily series query.
    fn daily_url(&self, ticker: &str, output_size: OutputSize) -> Result<Url> {
        Url::parse_with_params(
            &self.config.query_url(),
            &[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", ticker),
                ("outputsize", output_size.as_str()),
                ("datatype", "json"),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| Error::InvalidParameter(format!("invalid base URL: {e}")))
    }

    /// URL with the key replaced, safe to log.
    fn redacted(url: &Url) -> String {
        let mut shown = url.clone();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "apikey" { "***".into() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();
        shown.query_pairs_mut().clear().extend_pairs(pairs);
        shown.to_string()
    }

    /// Issue one GET and decode the body as JSON, whatever the status code.
    fn get_json(&self, url: Url) -> Result<Value> {
        tracing::debug!("GET {}", Self::redacted(&url));

        let response = self.http.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse response (HTTP {}): {}", status, body);
            Error::Json(e)
        })
    }

    /// Get the daily time series of an equity.
    ///
    /// # Arguments
    /// * `ticker` - Ticker symbol of the equity (e.g., "IBM")
    /// * `output_size` - `Compact` for the latest 100 observations, `Full` for all of them
    ///
    /// # Example
    /// ```ignore
    /// let table = client.fetch_daily("IBM", OutputSize::Compact)?;
    /// assert_eq!(table.len(), 100);
    /// ```
    pub fn fetch_daily(&self, ticker: &str, output_size: OutputSize) -> Result<TimeSeriesTable> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(Error::InvalidParameter("ticker symbol must not be empty".into()));
        }

        let url = self.daily_url(ticker, output_size)?;
        let body = self.get_json(url)?;

        let table = parse_daily_series(&body, ticker).inspect_err(|e| {
            if e.is_invalid_query() {
                tracing::warn!("No daily series returned for {}", ticker);
            }
        })?;

        tracing::debug!(
            "fetch_daily({}, {}): {} rows",
            ticker,
            output_size,
            table.len()
        );

        Ok(table)
    }

    /// Get the full daily history of an equity.
    pub fn fetch_daily_default(&self, ticker: &str) -> Result<TimeSeriesTable> {
        self.fetch_daily(ticker, OutputSize::default())
    }
}

impl DailySource for AlphaVantageClient {
    fn daily(&self, ticker: &str, output_size: OutputSize) -> anyhow::Result<TimeSeriesTable> {
        Ok(self.fetch_daily(ticker, output_size)?)
    }
}

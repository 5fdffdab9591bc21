//! # Alpha Vantage API Client
//!
//! A small blocking client for the `TIME_SERIES_DAILY` endpoint of an
//! Alpha Vantage compatible service. Responses are normalized into
//! [`equity_core::TimeSeriesTable`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use alphavantage_api::AlphaVantageClient;
//! use equity_core::OutputSize;
//!
//! let client = AlphaVantageClient::new("your-api-key")?;
//! let ibm = client.fetch_daily("IBM", OutputSize::Compact)?;
//! println!("{} rows, last close {:?}", ibm.len(), ibm.last().map(|b| b.close));
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! use alphavantage_api::{AlphaVantageClient, Config};
//!
//! let config = Config::default().with_base_url("https://www.alphavantage.co");
//! let client = AlphaVantageClient::with_config("your-api-key", config)?;
//! ```
//!
//! Each call issues exactly one request. There is no retry or rate limiting;
//! callers own that policy.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::AlphaVantageClient;
pub use config::Config;
pub use error::{Error, Result};
pub use types::parse_daily_series;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default host serving the Alpha Vantage query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://learn-api.wqu.edu/1/data-services/alpha-vantage";

/// Key holding the daily series in a successful response.
pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";

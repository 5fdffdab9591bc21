//! Persistence for daily equity time series.
//!
//! This crate stores [`TimeSeriesTable`]s as named DuckDB tables and reads them
//! back. [`ingest`] ties a remote [`DailySource`] to the repository: fetch a
//! ticker, then write it under the ticker's name.

pub mod error;
pub mod repository;

use anyhow::{Context, Result};
use equity_core::{DailySource, IfExists, OutputSize, TimeSeriesTable};

pub use error::StoreError;
pub use repository::{InsertReport, SqlRepository};

/// Fetch one ticker from `source` and store it in `repo` under the ticker name.
///
/// Surrounding whitespace is stripped from `ticker` before either step.
pub fn ingest<S: DailySource + ?Sized>(
    source: &S,
    repo: &mut SqlRepository,
    ticker: &str,
    output_size: OutputSize,
    if_exists: IfExists,
) -> Result<InsertReport> {
    let ticker = ticker.trim();
    let records = source
        .daily(ticker, output_size)
        .with_context(|| format!("Failed to fetch daily series for {ticker}"))?;

    log::info!(
        "Fetched {} daily rows for {} ({})",
        records.len(),
        ticker,
        output_size
    );

    let report = repo
        .insert_table(ticker, &records, if_exists)
        .with_context(|| format!("Failed to store table {ticker}"))?;

    Ok(report)
}

/// Read back at most `limit` of the most recent rows for a ticker.
pub fn load_recent(
    repo: &SqlRepository,
    ticker: &str,
    limit: Option<usize>,
) -> Result<TimeSeriesTable> {
    repo.read_table(ticker, limit)
        .with_context(|| format!("Failed to read table {ticker}"))
}

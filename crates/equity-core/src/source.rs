//! Data source trait definition.

use crate::{OutputSize, TimeSeriesTable};

/// Trait for types that can load a daily series for a ticker.
///
/// This trait uses `anyhow::Result` for flexible error handling.
pub trait DailySource {
    fn daily(&self, ticker: &str, output_size: OutputSize) -> anyhow::Result<TimeSeriesTable>;
}

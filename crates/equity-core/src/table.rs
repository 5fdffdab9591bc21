//! Date-indexed table of daily bars.

use chrono::NaiveDate;
use thiserror::Error;

use crate::bar::DailyBar;

/// Errors raised while building a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate date in time series: {0}")]
    DuplicateDate(NaiveDate),
}

/// An ordered sequence of daily bars.
///
/// Rows are kept in ascending date order and every date appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesTable {
    bars: Vec<DailyBar>,
}

impl TimeSeriesTable {
    /// Name of the index column.
    pub const INDEX: &'static str = "date";

    /// Value columns, in storage order.
    pub const COLUMNS: [&'static str; 5] = ["open", "high", "low", "close", "volume"];

    /// Creates an empty table.
    pub fn new() -> Self {
        Self { bars: Vec::new() }
    }

    /// Builds a table from bars in any order.
    pub fn from_bars(mut bars: Vec<DailyBar>) -> Result<Self, TableError> {
        bars.sort_by_key(|b| b.date);
        if let Some(pair) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(TableError::DuplicateDate(pair[0].date));
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyBar> {
        self.bars.iter()
    }

    /// Returns the index column.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Looks up the bar for a date.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyBar> {
        self.bars
            .binary_search_by_key(&date, |b| b.date)
            .ok()
            .map(|i| &self.bars[i])
    }

    /// Returns one value column, or `None` if the name is not an OHLCV column.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        if !Self::COLUMNS.contains(&name) {
            return None;
        }
        self.bars.iter().map(|b| b.field(name)).collect()
    }

    pub fn first(&self) -> Option<&DailyBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// The `n` most recent bars, still in ascending order.
    pub fn tail(&self, n: usize) -> TimeSeriesTable {
        let start = self.bars.len().saturating_sub(n);
        Self {
            bars: self.bars[start..].to_vec(),
        }
    }
}

impl IntoIterator for TimeSeriesTable {
    type Item = DailyBar;
    type IntoIter = std::vec::IntoIter<DailyBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.into_iter()
    }
}

impl<'a> IntoIterator for &'a TimeSeriesTable {
    type Item = &'a DailyBar;
    type IntoIter = std::slice::Iter<'a, DailyBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> DailyBar {
        DailyBar::new(day(d), close - 1.0, close + 1.0, close - 2.0, close, 100.0 * d as f64)
    }

    #[test]
    fn test_from_bars_sorts_ascending() {
        let table = TimeSeriesTable::from_bars(vec![bar(5, 50.0), bar(1, 10.0), bar(3, 30.0)]).unwrap();
        assert_eq!(table.dates(), vec![day(1), day(3), day(5)]);
        assert_eq!(table.first().unwrap().close, 10.0);
        assert_eq!(table.last().unwrap().close, 50.0);
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let err = TimeSeriesTable::from_bars(vec![bar(2, 1.0), bar(4, 2.0), bar(2, 3.0)]).unwrap_err();
        assert_eq!(err, TableError::DuplicateDate(day(2)));
    }

    #[test]
    fn test_get_and_column() {
        let table = TimeSeriesTable::from_bars(vec![bar(1, 10.0), bar(2, 20.0)]).unwrap();
        assert_eq!(table.get(day(2)).unwrap().close, 20.0);
        assert!(table.get(day(3)).is_none());
        assert_eq!(table.column("close"), Some(vec![10.0, 20.0]));
        assert_eq!(table.column("volume"), Some(vec![100.0, 200.0]));
        assert_eq!(table.column("date"), None);
    }

    #[test]
    fn test_tail() {
        let table =
            TimeSeriesTable::from_bars((1..=10).map(|d| bar(d, d as f64)).collect()).unwrap();
        let tail = table.tail(3);
        assert_eq!(tail.dates(), vec![day(8), day(9), day(10)]);
        assert_eq!(table.tail(50).len(), 10);
        assert!(TimeSeriesTable::new().tail(2).is_empty());
    }
}

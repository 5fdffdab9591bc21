//! Daily series payload normalization.

use chrono::NaiveDate;
use equity_core::{DailyBar, TimeSeriesTable};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::DAILY_SERIES_KEY;

/// Date format used for the keys of the daily series object.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize a `TIME_SERIES_DAILY` response body into a table.
///
/// Field keys such as `"1. open"` lose their numeric prefix, dates become the
/// index and every value is coerced to `f64`. A body without the
/// `"Time Series (Daily)"` key is reported as [`Error::InvalidQuery`].
pub fn parse_daily_series(body: &Value, ticker: &str) -> Result<TimeSeriesTable> {
    let series = match daily_series_object(body) {
        Some(series) => series,
        None if body.get(DAILY_SERIES_KEY).is_some() => {
            return Err(Error::MalformedPayload(format!(
                "'{DAILY_SERIES_KEY}' is not a JSON object"
            )));
        }
        None => {
            return Err(Error::InvalidQuery {
                ticker: ticker.to_string(),
            })
        }
    };

    let bars = series
        .iter()
        .map(|(date, fields)| parse_bar(date, fields))
        .collect::<Result<Vec<_>>>()?;

    TimeSeriesTable::from_bars(bars).map_err(|e| Error::MalformedPayload(e.to_string()))
}

/// Strip the positional prefix from a field key: `"4. close"` becomes `"close"`.
pub fn normalize_column(raw: &str) -> &str {
    match raw.split_once(". ") {
        Some((prefix, name)) if prefix.chars().all(|c| c.is_ascii_digit()) => name,
        _ => raw,
    }
}

fn parse_bar(date: &str, fields: &Value) -> Result<DailyBar> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| Error::MalformedPayload(format!("invalid date '{date}': {e}")))?;
    let fields = fields.as_object().ok_or_else(|| {
        Error::MalformedPayload(format!("entry for {date} is not a JSON object"))
    })?;

    let mut values: [Option<f64>; 5] = [None; 5];
    for (raw_key, raw_value) in fields {
        let column = normalize_column(raw_key);
        match TimeSeriesTable::COLUMNS.iter().position(|c| *c == column) {
            Some(idx) => values[idx] = Some(coerce_f64(date, column, raw_value)?),
            None => tracing::debug!("ignoring unknown field '{}' for {}", raw_key, date),
        }
    }

    let get = |idx: usize| -> Result<f64> {
        values[idx].ok_or_else(|| {
            Error::MalformedPayload(format!(
                "entry for {date} is missing '{}'",
                TimeSeriesTable::COLUMNS[idx]
            ))
        })
    };

    Ok(DailyBar::new(date, get(0)?, get(1)?, get(2)?, get(3)?, get(4)?))
}

fn coerce_f64(date: NaiveDate, column: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        Error::MalformedPayload(format!("non-numeric {column} for {date}: {value}"))
    })
}

/// Returns the daily series object if present, without normalizing it.
pub fn daily_series_object(body: &Value) -> Option<&Map<String, Value>> {
    body.get(DAILY_SERIES_KEY).and_then(Value::as_object)
}

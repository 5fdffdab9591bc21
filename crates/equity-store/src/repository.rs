//! DuckDB storage for daily time series tables.

use chrono::NaiveDate;
use duckdb::{params, params_from_iter, Connection};
use equity_core::{DailyBar, IfExists, TableError, TimeSeriesTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Outcome of a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertReport {
    pub transaction_successful: bool,
    pub records_inserted: usize,
}

/// Named-table repository over a DuckDB connection.
///
/// Each table holds one time series: a `date` column followed by the OHLCV
/// columns. Tables have no primary key, so appends may store a date twice.
#[derive(Debug)]
pub struct SqlRepository {
    conn: Connection,
}

impl SqlRepository {
    /// Wrap a caller-supplied connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Create or open a DuckDB database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path.as_ref())?;
        log::debug!("Opened database {:?}", path.as_ref());
        Ok(Self::new(conn))
    }

    /// Open a database file that must already exist.
    ///
    /// Unlike [`SqlRepository::open`], nothing is created on disk when the
    /// file is missing.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::DatabaseNotFound(PathBuf::from(path)));
        }
        Ok(Self::new(Connection::open(path)?))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Get the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Check whether a table with this name exists.
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        validate_name(table_name)?;
        table_exists_on(&self.conn, table_name)
    }

    /// Number of rows stored in a table.
    pub fn row_count(&self, table_name: &str) -> Result<u64> {
        let ident = quote_ident(table_name)?;
        if !table_exists_on(&self.conn, table_name)? {
            return Err(StoreError::TableNotFound(table_name.to_string()));
        }
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {ident}"), [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Insert a series as a table, all in one transaction.
    ///
    /// `if_exists` decides what happens when the table is already there:
    /// - `Fail`: returns [`StoreError::DuplicateTable`] and writes nothing.
    /// - `Replace`: drops the table before inserting the new rows.
    /// - `Append`: inserts the new rows next to the existing ones.
    pub fn insert_table(
        &mut self,
        table_name: &str,
        records: &TimeSeriesTable,
        if_exists: IfExists,
    ) -> Result<InsertReport> {
        let ident = quote_ident(table_name)?;
        let tx = self.conn.transaction()?;

        let exists = table_exists_on(&tx, table_name)?;
        match (if_exists, exists) {
            (IfExists::Fail, true) => {
                return Err(StoreError::DuplicateTable(table_name.to_string()));
            }
            (IfExists::Replace, true) => {
                tx.execute_batch(&format!("DROP TABLE {ident};"))?;
                create_table(&tx, &ident)?;
            }
            (IfExists::Append, true) => {}
            (_, false) => create_table(&tx, &ident)?,
        }

        let mut count = 0;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {ident} (date, open, high, low, close, volume)
                 VALUES (CAST(? AS DATE), ?, ?, ?, ?, ?)"
            ))?;

            for bar in records {
                stmt.execute(params![
                    bar.date.format(DATE_FORMAT).to_string(),
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.volume,
                ])?;
                count += 1;
            }
        }

        tx.commit()?;

        log::info!(
            "insert_table({}, {}): {} rows written",
            table_name,
            if_exists,
            count
        );

        Ok(InsertReport {
            transaction_successful: true,
            records_inserted: count,
        })
    }

    /// Insert a series, failing if the table already exists.
    pub fn insert_table_default(
        &mut self,
        table_name: &str,
        records: &TimeSeriesTable,
    ) -> Result<InsertReport> {
        self.insert_table(table_name, records, IfExists::default())
    }

    /// Read a table back as a series.
    ///
    /// With `limit` set, only the `limit` most recent dates are returned. Rows
    /// always come back in ascending date order.
    pub fn read_table(&self, table_name: &str, limit: Option<usize>) -> Result<TimeSeriesTable> {
        let ident = quote_ident(table_name)?;
        if limit == Some(0) {
            return Err(StoreError::InvalidLimit);
        }
        if !table_exists_on(&self.conn, table_name)? {
            return Err(StoreError::TableNotFound(table_name.to_string()));
        }

        let index = TimeSeriesTable::INDEX;
        let select = format!("SELECT CAST({index} AS VARCHAR), open, high, low, close, volume");
        // Limits past i64::MAX cannot be bound; they already cover every row.
        let limit = limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX));
        let sql = match limit {
            Some(_) => format!("{select} FROM {ident} ORDER BY {index} DESC LIMIT ?"),
            None => format!("{select} FROM {ident} ORDER BY {index} ASC"),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(limit), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let bars = rows
            .into_iter()
            .map(|(date, open, high, low, close, volume)| {
                let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
                    StoreError::CorruptRow {
                        table: table_name.to_string(),
                        reason: format!("invalid date '{date}': {e}"),
                    }
                })?;
                Ok(DailyBar::new(date, open, high, low, close, volume))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "read_table({}, {:?}): {} rows",
            table_name,
            limit,
            bars.len()
        );

        TimeSeriesTable::from_bars(bars).map_err(|e| match e {
            TableError::DuplicateDate(date) => StoreError::DuplicateDates {
                table: table_name.to_string(),
                date,
            },
        })
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn validate_name(table_name: &str) -> Result<()> {
    if table_name.trim().is_empty() || table_name.contains('\0') {
        return Err(StoreError::InvalidTableName(table_name.to_string()));
    }
    Ok(())
}

/// Quote a table name as a SQL identifier.
fn quote_ident(table_name: &str) -> Result<String> {
    validate_name(table_name)?;
    Ok(format!("\"{}\"", table_name.replace('"', "\"\"")))
}

/// DuckDB identifiers are case-insensitive, so the lookup is too.
fn table_exists_on(conn: &Connection, table_name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM information_schema.tables
         WHERE table_schema = current_schema() AND lower(table_name) = lower(?)",
        params![table_name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn create_table(conn: &Connection, ident: &str) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE {ident} (
            date DATE NOT NULL,
            open DOUBLE NOT NULL,
            high DOUBLE NOT NULL,
            low DOUBLE NOT NULL,
            close DOUBLE NOT NULL,
            volume DOUBLE NOT NULL
        );
        "#
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn series(days: std::ops::RangeInclusive<u32>) -> TimeSeriesTable {
        let bars = days
            .map(|d| {
                let p = 100.0 + d as f64;
                DailyBar::new(day(d), p, p + 1.5, p - 1.5, p + 0.5, 1000.0 * d as f64)
            })
            .collect();
        TimeSeriesTable::from_bars(bars).unwrap()
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("IBM").unwrap(), "\"IBM\"");
        assert_eq!(quote_ident("we\"ird").unwrap(), "\"we\"\"ird\"");
        assert!(matches!(quote_ident(""), Err(StoreError::InvalidTableName(_))));
        assert!(matches!(quote_ident("  "), Err(StoreError::InvalidTableName(_))));
    }

    #[test]
    fn test_db_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("test.duckdb");

        let mut repo = SqlRepository::open(&db_path).unwrap();
        let table = series(1..=3);

        let report = repo.insert_table("IBM", &table, IfExists::Replace).unwrap();
        assert_eq!(
            report,
            InsertReport {
                transaction_successful: true,
                records_inserted: 3
            }
        );

        let loaded = repo.read_table("IBM", None).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_table_exists_case_insensitive() {
        let mut repo = SqlRepository::open_in_memory().unwrap();
        assert!(!repo.table_exists("IBM").unwrap());

        repo.insert_table_default("IBM", &series(1..=2)).unwrap();
        assert!(repo.table_exists("IBM").unwrap());
        assert!(repo.table_exists("ibm").unwrap());
    }

    #[test]
    fn test_quoted_name_with_punctuation() {
        let mut repo = SqlRepository::open_in_memory().unwrap();
        repo.insert_table_default("BRK.B", &series(1..=2)).unwrap();
        assert_eq!(repo.read_table("BRK.B", None).unwrap().len(), 2);
        assert_eq!(repo.row_count("BRK.B").unwrap(), 2);
    }

    #[test]
    fn test_empty_series_creates_table() {
        let mut repo = SqlRepository::open_in_memory().unwrap();
        let report = repo
            .insert_table("EMPTY", &TimeSeriesTable::new(), IfExists::Fail)
            .unwrap();
        assert_eq!(report.records_inserted, 0);
        assert!(repo.table_exists("EMPTY").unwrap());
        assert!(repo.read_table("EMPTY", None).unwrap().is_empty());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut repo = SqlRepository::open_in_memory().unwrap();
        repo.insert_table_default("IBM", &series(1..=2)).unwrap();
        assert!(matches!(
            repo.read_table("IBM", Some(0)),
            Err(StoreError::InvalidLimit)
        ));
    }

    #[test]
    fn test_open_existing_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("missing").join("stocks.duckdb");

        let err = SqlRepository::open_existing(&db_path).unwrap_err();
        assert!(matches!(err, StoreError::DatabaseNotFound(ref p) if p == &db_path));
        assert!(!db_path.exists());
        assert!(!dir.path().join("missing").exists());

        SqlRepository::open(&db_path).unwrap();
        assert!(SqlRepository::open_existing(&db_path).is_ok());
    }

    #[test]
    fn test_row_count_missing_table() {
        let repo = SqlRepository::open_in_memory().unwrap();
        assert!(matches!(
            repo.row_count("NOPE"),
            Err(StoreError::TableNotFound(_))
        ));
    }
}

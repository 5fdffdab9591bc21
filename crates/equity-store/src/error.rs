//! Storage errors.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("table '{0}' already exists")]
    DuplicateTable(String),
    #[error("table '{0}' not found")]
    TableNotFound(String),
    #[error("database file not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),
    #[error("row limit must be a positive integer")]
    InvalidLimit,
    /// Only reachable after appending rows whose dates were already stored.
    #[error("table '{table}' holds more than one row for {date}")]
    DuplicateDates { table: String, date: NaiveDate },
    #[error("corrupt row in table '{table}': {reason}")]
    CorruptRow { table: String, reason: String },
    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

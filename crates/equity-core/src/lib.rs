//! Core types for equity ingestion.
//!
//! This crate provides the data structures shared by the fetcher and the store:
//! - `DailyBar` - one OHLCV row keyed by calendar date
//! - `TimeSeriesTable` - date-ordered, date-unique collection of bars
//! - `OutputSize` - how much history a remote source should return
//! - `IfExists` - conflict policy for writes to an existing table
//! - `DailySource` - trait for anything that can produce a `TimeSeriesTable`

pub mod bar;
pub mod output_size;
pub mod policy;
pub mod source;
pub mod table;

pub use bar::DailyBar;
pub use output_size::OutputSize;
pub use policy::IfExists;
pub use source::DailySource;
pub use table::{TableError, TimeSeriesTable};

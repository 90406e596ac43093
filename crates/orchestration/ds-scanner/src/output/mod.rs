//! Record sinks for completed scans.
//!
//! This module provides the [`RecordSink`] trait and implementations
//! for persisting the final record list:
//! - [`CsvSink`] - writes a local CSV file
//! - [`SheetSink`] - writes a Google Sheet (replace or append)

mod csv;
mod sheet;

pub use self::csv::CsvSink;
pub use sheet::{HttpSheetsApi, SheetSink, SheetWriteMode, SheetsApi};

use async_trait::async_trait;
use ds_error::Result;

use crate::FileRecord;

/// Trait for persisting the final record list.
///
/// A sink receives the complete, ordered record sequence exactly once,
/// after the walk has finished. A failed walk never reaches a sink, so
/// implementations never see partial results.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist every record, in order.
    async fn write_all(&self, records: &[FileRecord]) -> Result<()>;
}

//! ds-scanner - Drive folder inventory for drivescan.
//!
//! This crate provides functionality for enumerating every file beneath
//! a Google Drive folder and persisting the result. It supports:
//!
//! - Paginated Drive v3 listing with shared-drive visibility
//! - Bounded exponential-backoff retry for rate-limited/5xx responses
//! - Breadth-first folder traversal with full path reconstruction
//! - Output to a local CSV file or a Google Sheet (replace or append)
//!
//! # Example
//!
//! ```ignore
//! use ds_scanner::{
//!     CsvSink, DriveClient, DriveConfig, RecordSink, RetryConfig, RetryingLister, TreeWalker,
//! };
//!
//! let config = DriveConfig::new("ya29.a0...").with_page_size(1000);
//! let client = DriveClient::new(config)?;
//! let lister = RetryingLister::new(client, RetryConfig::default());
//!
//! let walker = TreeWalker::new(lister);
//! let outcome = walker.walk("1xYz_rootFolderId").await?;
//!
//! let sink = CsvSink::new("drive_inventory.csv");
//! sink.write_all(&outcome.records).await?;
//! eprintln!("Recorded {} files", outcome.stats.files_recorded);
//! ```

use serde::{Deserialize, Serialize};

pub mod drive;
pub mod output;
pub mod stats;
pub mod walker;

pub use drive::{
    ChildEntry, DriveClient, DriveConfig, FOLDER_MIME_TYPE, ListFolder, ListPage, RetryConfig,
    RetryingLister,
};
pub use output::{CsvSink, HttpSheetsApi, RecordSink, SheetSink, SheetWriteMode, SheetsApi};
pub use stats::ScanStats;
pub use walker::{ScanOutcome, TreeWalker};

/// Output column order shared by every sink.
pub const RECORD_HEADER: [&str; 6] = [
    "Path",
    "Name",
    "FileId",
    "MimeType",
    "SizeBytes",
    "ModifiedTime",
];

/// One inventory row for a discovered file.
///
/// Every field is a string: `size_bytes` is decimal text and optional
/// source fields render as the empty string when absent, so the record
/// maps 1:1 onto a spreadsheet or CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileRecord {
    /// Full logical path from the scan root (e.g. "/2024/report.pdf")
    pub path: String,

    /// Display name of the file
    pub name: String,

    /// Drive file identifier
    pub file_id: String,

    /// MIME type reported by the listing API
    pub mime_type: String,

    /// Size in bytes as decimal text, empty for sizeless entries
    pub size_bytes: String,

    /// RFC 3339 modification timestamp, empty if not reported
    pub modified_time: String,
}

impl FileRecord {
    /// Flatten the record into a row in [`RECORD_HEADER`] order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.path.clone(),
            self.name.clone(),
            self.file_id.clone(),
            self.mime_type.clone(),
            self.size_bytes.clone(),
            self.modified_time.clone(),
        ]
    }
}

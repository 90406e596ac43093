//! CLI argument definitions for drivescan.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// One-shot Drive folder inventory.
///
/// Walks every folder beneath a root folder id and records each file's
/// path, id, MIME type, size, and modification time to a Google Sheet
/// or a local CSV file.
///
/// ## Examples
///
/// Inventory to a sheet (replacing its content):
///   drivescan --root-folder-id 1xYz... --sheet-id 1AbC...
///
/// Append to an existing sheet:
///   drivescan --root-folder-id 1xYz... --sheet-id 1AbC... --sheet-mode append
///
/// Inventory to CSV:
///   drivescan --root-folder-id 1xYz... --write-mode csv --csv-path scan.csv
#[derive(Parser, Debug)]
#[command(name = "drivescan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Drive Configuration ===
    /// Folder id to start the scan from
    #[arg(long, env = "ROOT_FOLDER_ID")]
    pub root_folder_id: String,

    /// OAuth bearer token for the Drive and Sheets APIs
    #[arg(long, env = "DRIVE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Custom Drive API endpoint (for test servers)
    #[arg(long, env = "DRIVE_ENDPOINT")]
    pub drive_endpoint: Option<String>,

    /// Children requested per listing page (1-1000)
    #[arg(long, default_value = "1000", value_parser = parse_page_size)]
    pub page_size: u32,

    // === Retry Options ===
    /// Total attempts per page request before giving up (must be >= 1)
    #[arg(long, default_value = "5", value_parser = parse_positive_u32)]
    pub max_attempts: u32,

    /// Initial retry backoff in milliseconds, doubled per attempt
    #[arg(long, default_value = "500")]
    pub retry_base_ms: u64,

    // === Destination Options ===
    /// Where the record list goes
    #[arg(long, value_enum, env = "WRITE_MODE", default_value = "sheet")]
    pub write_mode: WriteMode,

    /// Spreadsheet id (required when write-mode=sheet)
    #[arg(long, env = "SHEET_ID")]
    pub sheet_id: Option<String>,

    /// Sheet (tab) name within the spreadsheet
    #[arg(long, env = "SHEET_NAME", default_value = "ImportScan")]
    pub sheet_name: String,

    /// How existing sheet content is treated
    #[arg(long, value_enum, default_value = "replace")]
    pub sheet_mode: SheetModeArg,

    /// Custom Sheets API endpoint (for test servers)
    #[arg(long, env = "SHEETS_ENDPOINT")]
    pub sheets_endpoint: Option<String>,

    /// Output path when write-mode=csv
    #[arg(long, env = "CSV_PATH", default_value = "drive_inventory.csv")]
    pub csv_path: PathBuf,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Destination type.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WriteMode {
    /// Write to a Google Sheet
    Sheet,
    /// Write to a local CSV file
    Csv,
}

/// Sheet write mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SheetModeArg {
    /// Clear the sheet and write header + rows from the top
    Replace,
    /// Append rows after existing content
    Append,
}

impl From<SheetModeArg> for ds_scanner::SheetWriteMode {
    fn from(arg: SheetModeArg) -> Self {
        match arg {
            SheetModeArg::Replace => ds_scanner::SheetWriteMode::Replace,
            SheetModeArg::Append => ds_scanner::SheetWriteMode::Append,
        }
    }
}

/// Log level argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Parse a positive u32 (>= 1).
fn parse_positive_u32(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}

/// Parse a listing page size (1-1000).
fn parse_page_size(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(1..=1000).contains(&value) {
        return Err(format!("{} is not in 1..=1000", value));
    }
    Ok(value)
}

//! Main execution logic for the drivescan CLI.

use anyhow::Result;
use ds_scanner::{
    CsvSink, DriveClient, DriveConfig, HttpSheetsApi, RecordSink, RetryConfig, RetryingLister,
    ScanOutcome, SheetSink, TreeWalker,
};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::args::{Cli, LogLevel, WriteMode};

/// Initialize logging.
///
/// Logs go to stderr so stdout stays clean.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    subscriber.init();

    Ok(())
}

/// What the run produced, for the final report.
pub struct RunSummary {
    pub outcome: ScanOutcome,
    pub destination: String,
}

/// Execute a scan with the provided arguments.
pub async fn execute(args: Cli) -> Result<RunSummary> {
    // Destination configuration is validated before any network call.
    let destination = describe_destination(&args)?;

    let mut drive_config =
        DriveConfig::new(&args.access_token).with_page_size(args.page_size);
    if let Some(endpoint) = &args.drive_endpoint {
        drive_config = drive_config.with_endpoint(endpoint);
    }

    let client = DriveClient::new(drive_config)?;
    let retry = RetryConfig::new()
        .with_max_attempts(args.max_attempts)
        .with_base_delay_ms(args.retry_base_ms);

    let walker = TreeWalker::new(RetryingLister::new(client, retry));
    let outcome = walker.walk(&args.root_folder_id).await?;

    match args.write_mode {
        WriteMode::Csv => {
            let sink = CsvSink::new(&args.csv_path);
            sink.write_all(&outcome.records).await?;
        }
        WriteMode::Sheet => {
            // Checked by describe_destination above.
            let sheet_id = args.sheet_id.as_deref().unwrap_or_default();
            let mut api = HttpSheetsApi::new(sheet_id, &args.access_token)?;
            if let Some(endpoint) = &args.sheets_endpoint {
                api = api.with_endpoint(endpoint);
            }

            let sink = SheetSink::new(api, &args.sheet_name, args.sheet_mode.into());
            sink.write_all(&outcome.records).await?;
        }
    }

    Ok(RunSummary {
        outcome,
        destination,
    })
}

/// Validate destination settings and render the destination label.
fn describe_destination(args: &Cli) -> Result<String> {
    match args.write_mode {
        WriteMode::Csv => Ok(format!("csv file {}", args.csv_path.display())),
        WriteMode::Sheet => {
            let sheet_id = args
                .sheet_id
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--sheet-id is required when write-mode=sheet"))?;
            Ok(format!("sheet {}/{}", sheet_id, args.sheet_name))
        }
    }
}

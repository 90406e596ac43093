//! drivescan CLI
//!
//! One-shot Drive folder inventory to CSV or Google Sheets.

use clap::Parser;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    run::init_logging(args.log_level)?;

    let summary = run::execute(args).await?;
    let stats = &summary.outcome.stats;

    // Report results to stderr
    eprintln!();
    eprintln!("Scan completed:");
    eprintln!("  Files recorded:   {}", stats.files_recorded);
    eprintln!("  Folders expanded: {}", stats.folders_expanded);
    eprintln!("  Bytes recorded:   {}", format_bytes(stats.bytes_recorded));
    eprintln!("  Destination:      {}", summary.destination);

    if let Some(duration) = stats.duration() {
        eprintln!(
            "  Duration:         {:.2}s",
            duration.num_milliseconds() as f64 / 1000.0
        );
    }

    Ok(())
}

/// Format bytes as human-readable string.
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

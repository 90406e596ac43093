//! Statistics for scan runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Counters collected during a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// When the scan started
    pub started_at: Option<DateTime<Utc>>,

    /// When the scan completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Folders expanded (dequeued and listed)
    pub folders_expanded: usize,

    /// File records emitted
    pub files_recorded: usize,

    /// Total bytes across recorded files that reported a size
    pub bytes_recorded: u64,
}

impl ScanStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark the scan as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record an expanded folder.
    pub fn record_folder(&mut self) {
        self.folders_expanded += 1;
    }

    /// Record an emitted file and its size, if it reported one.
    pub fn record_file(&mut self, size_bytes: Option<u64>) {
        self.files_recorded += 1;
        self.bytes_recorded += size_bytes.unwrap_or(0);
    }

    /// Get the duration of the scan.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Calculate the throughput in files per second.
    pub fn files_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            let secs = d.num_milliseconds() as f64 / 1000.0;
            if secs > 0.0 {
                self.files_recorded as f64 / secs
            } else {
                0.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = ScanStats::new();
        assert!(stats.started_at.is_some());
        assert!(stats.completed_at.is_none());
        assert_eq!(stats.files_recorded, 0);
    }

    #[test]
    fn test_stats_record_file() {
        let mut stats = ScanStats::new();
        stats.record_file(Some(1024));
        stats.record_file(None);
        stats.record_file(Some(2048));

        assert_eq!(stats.files_recorded, 3);
        assert_eq!(stats.bytes_recorded, 3072);
    }

    #[test]
    fn test_stats_record_folder() {
        let mut stats = ScanStats::new();
        stats.record_folder();
        stats.record_folder();

        assert_eq!(stats.folders_expanded, 2);
        assert_eq!(stats.files_recorded, 0);
    }

    #[test]
    fn test_stats_duration() {
        let mut stats = ScanStats::new();
        stats.complete();

        assert!(stats.duration().is_some());
        assert!(stats.duration().unwrap().num_milliseconds() >= 0);
    }

    #[test]
    fn test_stats_default_has_no_duration() {
        let stats = ScanStats::default();
        assert!(stats.duration().is_none());
        assert!(stats.files_per_second().is_none());
    }
}

//! CSV file sink.

use async_trait::async_trait;
use ds_error::{DsError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::RecordSink;
use crate::{FileRecord, RECORD_HEADER};

/// Sink that writes records to a local CSV file.
///
/// Comma-delimited with a fixed six-column header; fields containing a
/// delimiter, quote, or newline are quote-wrapped with internal quotes
/// doubled (RFC 4180).
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink targeting the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target path of this sink.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write header and records to any writer.
    fn write_to<W: Write>(writer: W, records: &[FileRecord]) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(RECORD_HEADER)
            .map_err(|e| DsError::Csv(e.to_string()))?;

        for record in records {
            csv.write_record(record.to_row())
                .map_err(|e| DsError::Csv(e.to_string()))?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[async_trait]
impl RecordSink for CsvSink {
    async fn write_all(&self, records: &[FileRecord]) -> Result<()> {
        let file = File::create(&self.path)?;
        Self::write_to(file, records)?;

        info!(path = %self.path.display(), rows = records.len(), "Wrote CSV");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, name: &str) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            name: name.to_string(),
            file_id: "id-1".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: "10".to_string(),
            modified_time: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    fn render(records: &[FileRecord]) -> String {
        let mut buf = Vec::new();
        CsvSink::write_to(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_always_first() {
        let out = render(&[]);
        assert_eq!(out, "Path,Name,FileId,MimeType,SizeBytes,ModifiedTime\n");
    }

    #[test]
    fn test_plain_fields_unquoted() {
        let out = render(&[record("/a/b.txt", "b.txt")]);
        let mut lines = out.lines();
        lines.next();
        assert_eq!(
            lines.next().unwrap(),
            "/a/b.txt,b.txt,id-1,text/plain,10,2024-03-01T10:00:00Z"
        );
    }

    #[test]
    fn test_delimiter_and_quote_escaping() {
        let out = render(&[record("/x", r#"a,"b"#)]);
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains(r#""a,""b""#));
    }

    #[test]
    fn test_escaping_round_trips() {
        let original = record("/x", "a,\"b\nc");
        let out = render(&[original.clone()]);

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(1).unwrap(), original.name);
        assert_eq!(row.len(), RECORD_HEADER.len());
    }

    #[test]
    fn test_empty_optionals_stay_empty_fields() {
        let mut rec = record("/x", "doc");
        rec.size_bytes = String::new();
        rec.modified_time = String::new();

        let out = render(&[rec]);
        assert!(out.lines().nth(1).unwrap().ends_with("text/plain,,"));
    }

    #[tokio::test]
    async fn test_writes_file_at_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");

        let sink = CsvSink::new(&path);
        sink.write_all(&[record("/a.txt", "a.txt")]).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.starts_with("Path,Name"));
    }

    #[tokio::test]
    async fn test_unwritable_path_surfaces_io_error() {
        let sink = CsvSink::new("/nonexistent-dir/inventory.csv");
        let err = sink.write_all(&[]).await.unwrap_err();
        assert!(matches!(err, DsError::Io(_)));
    }
}

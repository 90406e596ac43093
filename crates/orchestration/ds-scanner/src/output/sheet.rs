//! Google Sheet sink.

use async_trait::async_trait;
use ds_error::{DsError, Result};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use super::RecordSink;
use crate::{FileRecord, RECORD_HEADER};

const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com/v4";

/// How the sink treats existing sheet content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetWriteMode {
    /// Clear the sheet, then write header + rows from A1
    Replace,

    /// Append rows below existing content; header only if the sheet is empty
    Append,
}

/// Narrow seam over the Sheets v4 values operations.
///
/// [`SheetSink`] drives these four calls; tests substitute a recording
/// fake, production uses [`HttpSheetsApi`]. Ranges are A1 notation
/// including the sheet name.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Clear all values in a range.
    async fn clear(&self, range: &str) -> Result<()>;

    /// Overwrite values starting at the top-left of a range.
    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()>;

    /// Append rows after the last row of the table containing a range.
    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()>;

    /// Read current values in a range (empty cells are omitted).
    async fn read(&self, range: &str) -> Result<Vec<Vec<String>>>;
}

/// Sink that writes records to one sheet of a spreadsheet.
pub struct SheetSink<A: SheetsApi> {
    api: A,
    sheet_name: String,
    mode: SheetWriteMode,
}

impl<A: SheetsApi> SheetSink<A> {
    /// Create a sink targeting the named sheet.
    pub fn new(api: A, sheet_name: impl Into<String>, mode: SheetWriteMode) -> Self {
        Self {
            api,
            sheet_name: sheet_name.into(),
            mode,
        }
    }

    fn header_row() -> Vec<String> {
        RECORD_HEADER.iter().map(|h| h.to_string()).collect()
    }

    /// Probe range covering the full header width of the first row.
    ///
    /// The predecessor of this tool probed only A1, so a sheet with a
    /// blank first cell but data elsewhere was treated as empty and got
    /// a duplicate header. Probing the whole first row closes that gap.
    fn probe_range(&self) -> String {
        format!("{}!A1:F1", self.sheet_name)
    }
}

#[async_trait]
impl<A: SheetsApi> RecordSink for SheetSink<A> {
    async fn write_all(&self, records: &[FileRecord]) -> Result<()> {
        let data_rows: Vec<Vec<String>> = records.iter().map(|r| r.to_row()).collect();

        match self.mode {
            SheetWriteMode::Replace => {
                // Clearing the bare sheet range empties the whole sheet,
                // so stale rows beyond the new data's extent cannot survive.
                self.api.clear(&self.sheet_name).await?;

                let mut rows = vec![Self::header_row()];
                rows.extend(data_rows);
                self.api
                    .update(&format!("{}!A1", self.sheet_name), rows)
                    .await?;
            }
            SheetWriteMode::Append => {
                let existing = self.api.read(&self.probe_range()).await?;

                let mut rows = Vec::with_capacity(data_rows.len() + 1);
                if existing.is_empty() {
                    rows.push(Self::header_row());
                }
                rows.extend(data_rows);
                self.api
                    .append(&format!("{}!A1", self.sheet_name), rows)
                    .await?;
            }
        }

        info!(
            sheet = %self.sheet_name,
            rows = records.len(),
            mode = ?self.mode,
            "Wrote sheet"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// HTTP implementation of [`SheetsApi`] over the Sheets v4 REST API.
pub struct HttpSheetsApi {
    http: reqwest::Client,
    endpoint: String,
    spreadsheet_id: String,
    access_token: String,
}

impl HttpSheetsApi {
    /// Create an API handle for one spreadsheet.
    pub fn new(spreadsheet_id: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DsError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            access_token: access_token.into(),
        })
    }

    /// Override the API endpoint (for test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// URL for a values operation on a range, sheet name percent-encoded.
    fn values_url(&self, range: &str, suffix: &str) -> String {
        let encoded = utf8_percent_encode(range, NON_ALPHANUMERIC);
        format!(
            "{}/spreadsheets/{}/values/{}{}",
            self.endpoint, self.spreadsheet_id, encoded, suffix
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DsError::api(status.as_u16(), message));
        }
        Ok(response)
    }
}

#[async_trait]
impl SheetsApi for HttpSheetsApi {
    async fn clear(&self, range: &str) -> Result<()> {
        let response = self
            .http
            .post(self.values_url(range, ":clear"))
            .bearer_auth(&self.access_token)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| DsError::Transport(format!("values.clear failed: {e}")))?;

        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let response = self
            .http
            .put(self.values_url(range, "?valueInputOption=RAW"))
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| DsError::Transport(format!("values.update failed: {e}")))?;

        Self::check(response).await?;
        Ok(())
    }

    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let response = self
            .http
            .post(self.values_url(range, ":append?valueInputOption=RAW&insertDataOption=INSERT_ROWS"))
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| DsError::Transport(format!("values.append failed: {e}")))?;

        Self::check(response).await?;
        Ok(())
    }

    async fn read(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let response = self
            .http
            .get(self.values_url(range, ""))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| DsError::Transport(format!("values.get failed: {e}")))?;

        let value_range: ValueRange = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| DsError::Decode(format!("invalid values.get response: {e}")))?;

        Ok(value_range.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Clear(String),
        Update(String, Vec<Vec<String>>),
        Append(String, Vec<Vec<String>>),
        Read(String),
    }

    /// Recording fake; `existing` is what a read probe reports.
    struct RecordingApi {
        calls: Mutex<Vec<Call>>,
        existing: Vec<Vec<String>>,
    }

    impl RecordingApi {
        fn new(existing: Vec<Vec<String>>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                existing,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SheetsApi for &RecordingApi {
        async fn clear(&self, range: &str) -> Result<()> {
            self.calls.lock().unwrap().push(Call::Clear(range.to_string()));
            Ok(())
        }

        async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(range.to_string(), rows));
            Ok(())
        }

        async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Append(range.to_string(), rows));
            Ok(())
        }

        async fn read(&self, range: &str) -> Result<Vec<Vec<String>>> {
            self.calls.lock().unwrap().push(Call::Read(range.to_string()));
            Ok(self.existing.clone())
        }
    }

    fn record(name: &str) -> FileRecord {
        FileRecord {
            path: format!("/{name}"),
            name: name.to_string(),
            file_id: "id".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: "1".to_string(),
            modified_time: String::new(),
        }
    }

    #[tokio::test]
    async fn test_replace_clears_before_writing() {
        let api = RecordingApi::new(vec![vec!["old".to_string()]]);
        let sink = SheetSink::new(&api, "ImportScan", SheetWriteMode::Replace);

        sink.write_all(&[record("a.txt")]).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Clear("ImportScan".to_string()));

        match &calls[1] {
            Call::Update(range, rows) => {
                assert_eq!(range, "ImportScan!A1");
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0][0], "Path");
                assert_eq!(rows[1][0], "/a.txt");
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_append_on_empty_sheet_writes_header() {
        let api = RecordingApi::new(vec![]);
        let sink = SheetSink::new(&api, "ImportScan", SheetWriteMode::Append);

        sink.write_all(&[record("a.txt")]).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls[0], Call::Read("ImportScan!A1:F1".to_string()));

        match &calls[1] {
            Call::Append(_, rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0][0], "Path");
            }
            other => panic!("expected append, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_append_on_populated_sheet_skips_header() {
        let api = RecordingApi::new(vec![vec!["Path".to_string()]]);
        let sink = SheetSink::new(&api, "ImportScan", SheetWriteMode::Append);

        sink.write_all(&[record("a.txt"), record("b.txt")])
            .await
            .unwrap();

        let calls = api.calls();
        match &calls[1] {
            Call::Append(range, rows) => {
                assert_eq!(range, "ImportScan!A1");
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0][0], "/a.txt");
                assert_eq!(rows[1][0], "/b.txt");
            }
            other => panic!("expected append, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_append_probe_covers_full_header_row() {
        // A blank A1 with data in B1 must still count as populated.
        let api = RecordingApi::new(vec![vec![String::new(), "stray".to_string()]]);
        let sink = SheetSink::new(&api, "ImportScan", SheetWriteMode::Append);

        sink.write_all(&[record("a.txt")]).await.unwrap();

        match &api.calls()[1] {
            Call::Append(_, rows) => {
                assert_eq!(rows.len(), 1);
                assert_ne!(rows[0][0], "Path");
            }
            other => panic!("expected append, got {other:?}"),
        }
    }

    #[test]
    fn test_values_url_encodes_sheet_name() {
        let api = HttpSheetsApi::new("sheet-id", "tok")
            .unwrap()
            .with_endpoint("http://localhost:4000/v4");

        let url = api.values_url("My Scan!A1:F1", ":clear");
        assert_eq!(
            url,
            "http://localhost:4000/v4/spreadsheets/sheet-id/values/My%20Scan%21A1%3AF1:clear"
        );
    }
}

//! Drive client configuration and the HTTP listing implementation.

use async_trait::async_trait;
use ds_error::{DsError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::list::{ListFolder, ListPage};

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/drive/v3";

/// Maximum page size the Drive v3 listing API accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Field set requested per child; everything a record needs, nothing more.
const LIST_FIELDS: &str = "nextPageToken,files(id,name,mimeType,size,modifiedTime)";

/// Configuration for Drive access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// OAuth bearer token; acquiring it is the caller's problem
    pub access_token: String,

    /// Children requested per page (1..=1000)
    pub page_size: u32,

    /// Custom API endpoint (for test servers)
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DriveConfig {
    /// Create a new DriveConfig with the required access token.
    ///
    /// Defaults to the maximum page size so a folder needs as few
    /// round-trips as possible.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            page_size: MAX_PAGE_SIZE,
            endpoint: None,
            timeout_secs: 30,
        }
    }

    /// Set the page size, clamped to the API maximum.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Set a custom endpoint (for test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP implementation of [`ListFolder`] over Drive v3 `files.list`.
pub struct DriveClient {
    http: reqwest::Client,
    config: DriveConfig,
    endpoint: String,
}

impl DriveClient {
    /// Create a client from configuration.
    pub fn new(config: DriveConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DsError::Config(format!("failed to build HTTP client: {e}")))?;

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            http,
            config,
            endpoint,
        })
    }
}

#[async_trait]
impl ListFolder for DriveClient {
    async fn fetch_page(&self, folder_id: &str, page_token: Option<&str>) -> Result<ListPage> {
        let query = format!("'{folder_id}' in parents and trashed=false");
        let page_size = self.config.page_size.to_string();

        // supportsAllDrives/includeItemsFromAllDrives make items in
        // shared drives visible, not only personally-owned ones.
        let mut request = self
            .http
            .get(format!("{}/files", self.endpoint))
            .bearer_auth(&self.config.access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", LIST_FIELDS),
                ("pageSize", page_size.as_str()),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DsError::Transport(format!("files.list request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DsError::api(status.as_u16(), message));
        }

        response
            .json::<ListPage>()
            .await
            .map_err(|e| DsError::Decode(format!("invalid files.list response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_config_defaults() {
        let config = DriveConfig::new("tok");

        assert_eq!(config.access_token, "tok");
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
        assert!(config.endpoint.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_drive_config_builder() {
        let config = DriveConfig::new("tok")
            .with_page_size(100)
            .with_endpoint("http://localhost:8080/drive/v3")
            .with_timeout(60);

        assert_eq!(config.page_size, 100);
        assert_eq!(
            config.endpoint.as_deref(),
            Some("http://localhost:8080/drive/v3")
        );
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_page_size_clamped_to_api_max() {
        assert_eq!(DriveConfig::new("tok").with_page_size(5000).page_size, 1000);
        assert_eq!(DriveConfig::new("tok").with_page_size(0).page_size, 1);
    }

    #[test]
    fn test_client_uses_custom_endpoint() {
        let config = DriveConfig::new("tok").with_endpoint("http://localhost:9999");
        let client = DriveClient::new(config).unwrap();
        assert_eq!(client.endpoint, "http://localhost:9999");
    }
}

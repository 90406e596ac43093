//! Wire types and the single-page listing seam.

use async_trait::async_trait;
use ds_error::Result;
use serde::Deserialize;

/// MIME type Drive uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// One direct child of a folder, as returned by the listing API.
///
/// Drive serializes `size` as a JSON string (int64) and omits it for
/// Google-native documents; `modifiedTime` is an RFC 3339 string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildEntry {
    /// File or folder identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// MIME type; folders carry [`FOLDER_MIME_TYPE`]
    pub mime_type: String,

    /// Size in bytes as decimal text, absent for sizeless entries
    #[serde(default)]
    pub size: Option<String>,

    /// Last modification timestamp, absent when not reported
    #[serde(default)]
    pub modified_time: Option<String>,
}

impl ChildEntry {
    /// Whether this entry is a folder (and must be expanded, not emitted).
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

/// One page of a folder listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    /// Continuation token; `None` means this was the last page
    #[serde(default)]
    pub next_page_token: Option<String>,

    /// Children on this page, in API order
    #[serde(default)]
    pub files: Vec<ChildEntry>,
}

/// Capability for listing one page of a folder's direct children.
///
/// This is the seam between the traversal engine and the network:
/// [`DriveClient`](crate::DriveClient) implements it over HTTP, and
/// tests inject in-memory fakes. One invocation performs exactly one
/// listing call; pagination and retry live in
/// [`RetryingLister`](crate::RetryingLister).
#[async_trait]
pub trait ListFolder: Send + Sync {
    /// Fetch one page of direct, non-trashed children of `folder_id`.
    ///
    /// `page_token` continues a previous page's listing. Errors surface
    /// the underlying API failure unmodified so the caller can inspect
    /// the HTTP status for retry decisions.
    async fn fetch_page(&self, folder_id: &str, page_token: Option<&str>) -> Result<ListPage>;
}

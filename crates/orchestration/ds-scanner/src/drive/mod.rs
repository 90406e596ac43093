//! Drive client and listing functionality.
//!
//! This module provides the listing side of the scanner:
//! - Client configuration over the Drive v3 `files.list` endpoint
//! - Single-page listing behind the [`ListFolder`] seam
//! - Bounded exponential-backoff retry and page-loop aggregation

mod client;
mod list;
mod retry;

pub use client::{DriveClient, DriveConfig};
pub use list::{ChildEntry, FOLDER_MIME_TYPE, ListFolder, ListPage};
pub use retry::{RetryConfig, RetryingLister};

//! Breadth-first folder traversal with path reconstruction.

use ds_error::Result;
use std::collections::VecDeque;
use tracing::debug;

use crate::FileRecord;
use crate::drive::{ChildEntry, ListFolder, RetryingLister};
use crate::stats::ScanStats;

/// Queue entry for a folder awaiting expansion.
///
/// `path` is the fully reconstructed logical path from the scan root,
/// `"/"` for the root itself.
#[derive(Debug, Clone)]
struct FolderNode {
    id: String,
    path: String,
}

/// Everything a completed walk produces.
#[derive(Debug)]
pub struct ScanOutcome {
    /// File records in discovery order (breadth-first, per-folder API order)
    pub records: Vec<FileRecord>,

    /// Counters for the run
    pub stats: ScanStats,
}

/// Breadth-first walker over a Drive folder tree.
///
/// Expands folders in FIFO discovery order, one listing call in flight
/// at a time. Folder children are enqueued with their reconstructed
/// path; everything else becomes a [`FileRecord`]. Any listing failure
/// aborts the whole walk - a single unreachable subfolder fails the
/// scan, with no skip-and-continue.
///
/// Termination relies on the folder graph being acyclic; shortcuts are
/// recorded as plain files and never followed.
pub struct TreeWalker<L: ListFolder> {
    lister: RetryingLister<L>,
}

impl<L: ListFolder> TreeWalker<L> {
    /// Create a walker over the given retrying lister.
    pub fn new(lister: RetryingLister<L>) -> Self {
        Self { lister }
    }

    /// Walk the tree rooted at `root_id` and collect every file record.
    pub async fn walk(&self, root_id: &str) -> Result<ScanOutcome> {
        let mut stats = ScanStats::new();
        let mut records = Vec::new();
        let mut queue = VecDeque::new();

        queue.push_back(FolderNode {
            id: root_id.to_string(),
            path: "/".to_string(),
        });

        while let Some(node) = queue.pop_front() {
            let children = self.lister.list_children(&node.id).await?;
            stats.record_folder();

            for child in children {
                if child.is_folder() {
                    queue.push_back(FolderNode {
                        path: join_path(&node.path, &child.name),
                        id: child.id,
                    });
                } else {
                    stats.record_file(child.size.as_deref().and_then(|s| s.parse().ok()));
                    records.push(make_record(&node.path, child));
                }
            }

            debug!(
                folder = %node.path,
                queued = queue.len(),
                recorded = records.len(),
                "Expanded folder"
            );
        }

        stats.complete();

        debug!(
            folders_expanded = stats.folders_expanded,
            files_recorded = stats.files_recorded,
            bytes = stats.bytes_recorded,
            "Walk completed"
        );

        Ok(ScanOutcome { records, stats })
    }
}

/// Join a parent path and a child name with a single separator.
fn join_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Build the output row for a non-folder child of `parent_path`.
fn make_record(parent_path: &str, child: ChildEntry) -> FileRecord {
    FileRecord {
        path: join_path(parent_path, &child.name),
        name: child.name,
        file_id: child.id,
        mime_type: child.mime_type,
        size_bytes: child.size.unwrap_or_default(),
        modified_time: child.modified_time.unwrap_or_default(),
    }
}

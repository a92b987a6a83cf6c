//! Type definitions for traversal results.

use serde::Serialize;
use std::path::PathBuf;

/// Outcome for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    /// Nothing qualified; the file was not written
    Unchanged,
    /// The file was rewritten (or would be, in a dry run)
    Modified {
        /// Spans deleted
        removed: usize,
    },
    /// A handler declined the document; the file was not written
    Skipped {
        /// Why
        reason: String,
    },
    /// Processing failed; the file was not written
    Failed {
        /// Error message
        error: String,
    },
}

/// A file and what happened to it
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path as discovered
    pub path: PathBuf,
    /// Outcome
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Counts over a [`TraversalResult`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files visited
    pub files_seen: usize,
    /// Files rewritten
    pub modified: usize,
    /// Files left as they were
    pub unchanged: usize,
    /// Files a handler declined
    pub skipped: usize,
    /// Files that failed
    pub failed: usize,
    /// Calls removed across all files
    pub calls_removed: usize,
}

/// Per-file outcomes of a run, in the order files were reported.
/// This struct is serialized to JSON if requested.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TraversalResult {
    /// Outcomes, one per visited file
    pub files: Vec<FileReport>,
    /// Counts over `files`
    pub summary: Summary,
    /// Whether the run wrote nothing by request
    pub dry_run: bool,
}

impl TraversalResult {
    /// Append an outcome.
    pub fn push(&mut self, report: FileReport) {
        let summary = &mut self.summary;
        summary.files_seen += 1;
        match &report.status {
            FileStatus::Unchanged => summary.unchanged += 1,
            FileStatus::Modified { removed } => {
                summary.modified += 1;
                summary.calls_removed += removed;
            }
            FileStatus::Skipped { .. } => summary.skipped += 1,
            FileStatus::Failed { .. } => summary.failed += 1,
        }
        self.files.push(report);
    }

    /// Append every outcome of another result.
    pub fn extend(&mut self, other: TraversalResult) {
        for report in other.files {
            self.push(report);
        }
    }

    /// Reports whose status satisfies `predicate`
    pub fn filter<'a>(
        &'a self,
        predicate: impl Fn(&FileStatus) -> bool + 'a,
    ) -> impl Iterator<Item = &'a FileReport> + 'a {
        self.files.iter().filter(move |r| predicate(&r.status))
    }

    /// Whether any file failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

//! Console cleaner driver.
//!
//! This module contains the traversal and rewriting driver, broken down into:
//! - `types`: Result types (`TraversalResult`, `FileReport`, `Summary`)
//! - `builder`: Builder-style configuration methods
//! - `processing`: Per-file read / transform / write
//! - `traversal`: Root handling, discovery and parallel dispatch

mod builder;
mod processing;
mod traversal;
/// Result types and run summaries.
pub mod types;

pub use types::{FileReport, FileStatus, Summary, TraversalResult};

use crate::dialect::Transformer;
use crate::policy::{IgnorePolicy, MatchPolicy};

/// The main driver.
/// Policies and the transformer are shared read-only by worker threads.
#[derive(Debug, Default)]
pub struct ConsoleCleaner {
    /// Per-document transformation settings
    pub transformer: Transformer,
    /// Paths to prune during traversal
    pub ignore: IgnorePolicy,
    /// File names to accept during traversal
    pub matcher: MatchPolicy,
    /// Whether VCS ignore files are honoured
    pub respect_gitignore: bool,
    /// Compute outcomes without writing
    pub dry_run: bool,
    /// Worker threads; `None` uses the global rayon pool
    pub jobs: Option<usize>,
    /// Progress bar for tracking processing progress (thread-safe).
    pub progress_bar: Option<std::sync::Arc<indicatif::ProgressBar>>,
}

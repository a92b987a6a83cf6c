//! Path utilities.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization for display and policy checks
//! - Source file discovery with ignore-policy pruning

use crate::dialect::Dialect;
use crate::policy::{IgnorePolicy, MatchPolicy};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use console_cleaner::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\app.ts")), "src/app.ts");
/// assert_eq!(normalize_display_path(Path::new("./src/main.js")), "src/main.js");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// `path` relative to `root`, `/`-separated. Empty for the root itself.
#[must_use]
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map_or_else(|_| normalize_display_path(path), normalize_display_path)
}

/// An entry the walker could not read
#[derive(Debug, Clone)]
pub struct WalkFailure {
    /// Path of the entry, when the walker reported one
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

/// Files found under one root
#[derive(Debug, Default)]
pub struct Discovery {
    /// Files to process, in walk order
    pub files: Vec<PathBuf>,
    /// Entries that failed during the walk
    pub failures: Vec<WalkFailure>,
    /// Directories visited, root excluded
    pub dir_count: usize,
}

/// Collects processable source files under `root`.
///
/// Uses the `ignore` crate's walker. Hidden entries are visited; VCS
/// ignore files are honoured only when `respect_gitignore` is set.
/// Entries whose root-relative path contains an ignore token are pruned
/// at traversal time, so ignored directories are never descended.
///
/// A file is kept when `matcher` accepts its name and a dialect handler
/// exists for its extension.
#[must_use]
pub fn collect_source_files(
    root: &Path,
    ignore: &IgnorePolicy,
    matcher: &MatchPolicy,
    respect_gitignore: bool,
) -> Discovery {
    use ignore::WalkBuilder;

    let root_for_filter = root.to_path_buf();
    let ignore_for_filter = ignore.clone();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .parents(respect_gitignore)
        .ignore(respect_gitignore)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .require_git(false)
        .filter_entry(move |entry| {
            let relative = relative_path(entry.path(), &root_for_filter);
            !ignore_for_filter.is_ignored(&relative)
        })
        .build();

    let mut discovery = Discovery::default();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("walk error: {err}");
                discovery.failures.push(WalkFailure {
                    path: walk_error_path(&err).unwrap_or_else(|| root.to_path_buf()),
                    message: err.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            if path != root {
                discovery.dir_count += 1;
            }
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !matcher.accepts(name) {
            continue;
        }
        if Dialect::from_path(path).is_none() {
            debug!("no handler for {}", normalize_display_path(path));
            continue;
        }
        discovery.files.push(path.to_path_buf());
    }

    discovery
}

fn walk_error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}

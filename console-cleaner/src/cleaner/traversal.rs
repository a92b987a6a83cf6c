//! Traversal methods for the console cleaner.
//!
//! Contains: `process_paths`, `process_directory`, `discover`

use super::{ConsoleCleaner, FileReport, FileStatus, TraversalResult};
use crate::constants::CHUNK_SIZE;
use crate::dialect::Dialect;
use crate::error::CleanError;
use crate::utils::{collect_source_files, normalize_display_path};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

impl ConsoleCleaner {
    /// Runs the cleaner on every file under `root` (or on `root` itself
    /// when it is a file).
    #[must_use]
    pub fn process_directory(&self, root: &Path) -> TraversalResult {
        self.process_paths(&[root.to_path_buf()])
    }

    /// Runs the cleaner on multiple roots (files or directories).
    ///
    /// Roots that resolve to the same location, or overlap, are processed
    /// once per file. With no roots the current directory is used.
    #[must_use]
    pub fn process_paths(&self, roots: &[PathBuf]) -> TraversalResult {
        let (files, mut result) = self.discover(roots);
        info!("processing {} file(s)", files.len());

        if let Some(ref pb) = self.progress_bar {
            pb.set_length(files.len() as u64);
        }

        for report in self.process_files(&files) {
            result.push(report);
        }
        result.dry_run = self.dry_run;
        result
    }

    /// Collects the files a run would process.
    ///
    /// Roots and walk entries that cannot be read are returned as failed
    /// reports alongside the file list.
    #[must_use]
    pub fn discover(&self, roots: &[PathBuf]) -> (Vec<PathBuf>, TraversalResult) {
        let default_root = [PathBuf::from(".")];
        let roots = if roots.is_empty() {
            &default_root[..]
        } else {
            roots
        };

        let mut failures = TraversalResult::default();
        let mut seen: FxHashSet<PathBuf> = FxHashSet::default();
        let mut files = Vec::new();

        for root in roots {
            let canonical = match root.canonicalize() {
                Ok(path) => path,
                Err(e) => {
                    let err = CleanError::io(root, e);
                    warn!("{err}");
                    failures.push(FileReport {
                        path: root.clone(),
                        status: FileStatus::Failed {
                            error: err.to_string(),
                        },
                    });
                    continue;
                }
            };

            if root.is_file() {
                if Dialect::from_path(root).is_none() {
                    debug!("no handler for {}", normalize_display_path(root));
                } else if seen.insert(canonical) {
                    files.push(root.clone());
                }
                continue;
            }

            let discovery =
                collect_source_files(root, &self.ignore, &self.matcher, self.respect_gitignore);
            debug!(
                "{}: {} file(s) in {} dir(s)",
                normalize_display_path(root),
                discovery.files.len(),
                discovery.dir_count
            );

            for failure in discovery.failures {
                failures.push(FileReport {
                    path: failure.path,
                    status: FileStatus::Failed {
                        error: failure.message,
                    },
                });
            }
            for file in discovery.files {
                let key = file
                    .strip_prefix(root)
                    .map_or_else(|_| file.clone(), |rel| canonical.join(rel));
                if seen.insert(key) {
                    files.push(file);
                }
            }
        }

        (files, failures)
    }

    fn process_files(&self, files: &[PathBuf]) -> Vec<FileReport> {
        let Some(jobs) = self.jobs else {
            return self.process_chunks(files);
        };
        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(|| self.process_chunks(files)),
            Err(e) => {
                warn!("could not build a {jobs}-thread pool ({e}), using the global pool");
                self.process_chunks(files)
            }
        }
    }

    fn process_chunks(&self, files: &[PathBuf]) -> Vec<FileReport> {
        // Process files in chunks to bound the number of documents in memory.
        let mut reports = Vec::with_capacity(files.len());
        for chunk in files.chunks(CHUNK_SIZE) {
            let chunk_reports: Vec<FileReport> = chunk
                .par_iter()
                .map(|path| self.process_file(path))
                .collect();
            reports.extend(chunk_reports);
        }
        reports
    }
}

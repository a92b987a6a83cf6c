//! Per-file rewriting.
//!
//! Contains: `process_file`, `transform_file`

use super::{ConsoleCleaner, FileReport, FileStatus};
use crate::dialect::Dialect;
use crate::error::CleanError;
use crate::utils::normalize_display_path;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error, info};

impl ConsoleCleaner {
    /// Reads, transforms and (unless dry-running) rewrites one file.
    ///
    /// Never panics and never aborts: every failure is captured in the
    /// returned report and the file is left as it was.
    #[must_use]
    pub fn process_file(&self, path: &Path) -> FileReport {
        let shown = normalize_display_path(path);
        let status = match self.transform_file(path) {
            Ok(status) => status,
            Err(err) => {
                error!("{shown}: {err}");
                FileStatus::Failed {
                    error: err.to_string(),
                }
            }
        };

        match &status {
            FileStatus::Modified { removed } if self.dry_run => {
                info!("{shown}: would remove {removed} call(s)");
            }
            FileStatus::Modified { removed } => info!("{shown}: removed {removed} call(s)"),
            FileStatus::Skipped { reason } => debug!("{shown}: skipped ({reason})"),
            FileStatus::Unchanged => debug!("{shown}: unchanged"),
            FileStatus::Failed { .. } => {}
        }

        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }

        FileReport {
            path: path.to_path_buf(),
            status,
        }
    }

    fn transform_file(&self, path: &Path) -> Result<FileStatus, CleanError> {
        let Some(dialect) = Dialect::from_path(path) else {
            return Ok(FileStatus::Unchanged);
        };

        let bytes = fs::read(path).map_err(|e| CleanError::io(path, e))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| CleanError::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let excision = self.transformer.transform(&text, dialect)?;
        if let Some(reason) = excision.skipped {
            return Ok(FileStatus::Skipped { reason });
        }
        if excision.text == text {
            return Ok(FileStatus::Unchanged);
        }

        if !self.dry_run {
            fs::write(path, &excision.text).map_err(|e| CleanError::io(path, e))?;
        }
        Ok(FileStatus::Modified {
            removed: excision.removed,
        })
    }
}

//! Error taxonomy for per-file cleaning.
//!
//! None of these abort a multi-file run: the rewriter records them against
//! the file and moves on.

use crate::dialect::Dialect;
use crate::fix::RewriteError;
use crate::syntax::ParseDiagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while cleaning one document
#[derive(Debug, Error)]
pub enum CleanError {
    /// A script region could not be parsed
    #[error("failed to parse {dialect} source at {diagnostic}")]
    Parse {
        /// Dialect of the document being cleaned
        dialect: Dialect,
        /// First error reported by the grammar
        diagnostic: ParseDiagnostic,
    },
    /// The integration a dialect depends on is not active
    #[error("{dialect} files need the `{integration}` integration, which is not enabled")]
    MissingIntegration {
        /// Dialect that was skipped
        dialect: Dialect,
        /// Integration name that was looked for
        integration: &'static str,
    },
    /// The template compiler collaborator failed
    #[error("template compilation failed: {message}")]
    TemplateCompile {
        /// Message returned by the compiler
        message: String,
    },
    /// Reading or writing the file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being processed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// Span invariant violated while excising
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

impl CleanError {
    /// Build a parse error for `dialect`
    #[must_use]
    pub fn parse(dialect: Dialect, diagnostic: ParseDiagnostic) -> Self {
        Self::Parse {
            dialect,
            diagnostic,
        }
    }

    /// Build an I/O error for `path`
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

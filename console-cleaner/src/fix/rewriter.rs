//! Byte-range safe excision.
//!
//! Applies the deletions of a [`SpanSet`] to a source buffer, back to
//! front, so offsets computed against the original text stay valid for
//! every deletion in the pass.
//!
//! # Usage
//!
//! ```
//! use console_cleaner::fix::{CallSpan, SpanSet};
//!
//! let mut spans = SpanSet::new();
//! spans.insert(CallSpan::new(5, 11)).expect("no overlap");
//! let cleaned = spans.excise("hello world").expect("should apply");
//! assert_eq!(cleaned, "hello");
//! ```

use super::span::{CallSpan, SpanSet};
use thiserror::Error;

/// Error during excision
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Two spans partially overlap
    #[error("overlapping spans {first} and {second}")]
    OverlappingSpans {
        /// Span already in the set
        first: CallSpan,
        /// Span that was being inserted
        second: CallSpan,
    },
    /// Span range is out of bounds
    #[error("span {span} out of bounds: source length {source_len}")]
    OutOfBounds {
        /// The bad span
        span: CallSpan,
        /// Length of the source
        source_len: usize,
    },
    /// Span boundary falls inside a multi-byte character
    #[error("span boundary {offset} is not on a character boundary")]
    NotCharBoundary {
        /// The offending offset
        offset: usize,
    },
}

/// Validate spans against `source` without applying them.
///
/// # Errors
/// Returns error if a span is out of bounds or splits a UTF-8 sequence.
pub fn validate(source: &str, spans: &SpanSet) -> Result<(), RewriteError> {
    for span in spans.iter() {
        if span.end > source.len() {
            return Err(RewriteError::OutOfBounds {
                span: *span,
                source_len: source.len(),
            });
        }
        for offset in [span.start, span.end] {
            if !source.is_char_boundary(offset) {
                return Err(RewriteError::NotCharBoundary { offset });
            }
        }
    }
    Ok(())
}

/// Remove every span in `spans` from `source` and return the new text.
///
/// Spans are applied in descending start order, each as a splice
/// `source[..start] + source[end..]`. Nothing is modified unless every
/// span validates.
///
/// # Errors
/// Returns error if a span is out of bounds or splits a UTF-8 sequence.
pub fn excise(source: &str, spans: &SpanSet) -> Result<String, RewriteError> {
    validate(source, spans)?;

    let mut result = source.to_owned();
    for span in spans.iter() {
        result.replace_range(span.range(), "");
    }
    Ok(result)
}

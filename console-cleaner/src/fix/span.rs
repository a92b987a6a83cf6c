//! Half-open byte ranges and the ordered span list.

use super::rewriter::{excise, RewriteError};
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Range;

/// A half-open byte range `[start, end)` into one text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CallSpan {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl CallSpan {
    /// Create a span. Arguments given in the wrong order are swapped.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Number of bytes covered
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Move the span by `offset` bytes, e.g. from region to document coordinates
    #[must_use]
    pub const fn shift(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Check if this span overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if `other` lies entirely inside this span
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The span as a `Range` for slicing
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for CallSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Owned list of non-overlapping spans for one region, kept in descending
/// start order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanSet {
    spans: SmallVec<[CallSpan; 8]>,
}

impl SpanSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of spans held
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// True when there is nothing to delete
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Spans in deletion order (descending start)
    pub fn iter(&self) -> impl Iterator<Item = &CallSpan> + '_ {
        self.spans.iter()
    }

    /// Insert a span, keeping the set ordered and overlap-free.
    ///
    /// A span already covered by a member is dropped; a span covering
    /// members replaces them. Returns whether the set changed.
    ///
    /// # Errors
    /// Returns [`RewriteError::OverlappingSpans`] on a partial overlap.
    pub fn insert(&mut self, span: CallSpan) -> Result<bool, RewriteError> {
        if span.is_empty() || self.spans.iter().any(|s| s.contains(&span)) {
            return Ok(false);
        }
        if let Some(partial) = self
            .spans
            .iter()
            .find(|s| s.overlaps(&span) && !span.contains(s))
        {
            return Err(RewriteError::OverlappingSpans {
                first: *partial,
                second: span,
            });
        }

        self.spans.retain(|s| !span.contains(s));
        let idx = self.spans.partition_point(|s| s.start > span.start);
        self.spans.insert(idx, span);
        Ok(true)
    }

    /// Merge another region's spans, shifted by that region's offset.
    ///
    /// # Errors
    /// Returns an error if a shifted span partially overlaps a member.
    pub fn absorb(&mut self, other: &SpanSet, offset: usize) -> Result<(), RewriteError> {
        for span in other.iter() {
            self.insert(span.shift(offset))?;
        }
        Ok(())
    }

    /// Remove every span from `source`.
    ///
    /// # Errors
    /// Returns an error if a span is out of bounds or splits a character.
    pub fn excise(&self, source: &str) -> Result<String, RewriteError> {
        excise(source, self)
    }
}

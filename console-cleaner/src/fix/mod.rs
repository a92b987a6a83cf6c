//! Span model and excision.
//!
//! Every dialect handler describes what to delete as a set of half-open
//! byte ranges ([`CallSpan`]) collected into a [`SpanSet`]. The set keeps
//! its spans sorted by descending start offset and rejects overlaps, so
//! deletions applied back-to-front never invalidate offsets that are still
//! pending.

mod rewriter;
mod span;

pub use rewriter::{excise, RewriteError};
pub use span::{CallSpan, SpanSet};

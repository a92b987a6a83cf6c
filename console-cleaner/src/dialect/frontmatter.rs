//! Frontmatter dialect (`.astro`).
//!
//! Only the script between the leading `---` marker pair is cleaned; the
//! template body after the closing marker is never scanned.

use super::scan::relocate;
use super::{Dialect, Excision};
use crate::constants::FRONTMATTER_MARKER;
use crate::engine::{collect_spans, ExcisionOptions, ScriptForm};
use crate::error::CleanError;
use crate::fix::SpanSet;
use crate::syntax::ScriptFlavor;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// What to do with a Frontmatter document that has no marker pair
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FrontmatterFallback {
    /// Return the document unchanged
    #[default]
    Skip,
    /// Treat the whole document as one script region
    #[value(name = "scan")]
    #[serde(rename = "scan")]
    ScanWhole,
}

fn is_marker_line(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r'])
        .trim_end_matches([' ', '\t'])
        == FRONTMATTER_MARKER
}

/// Byte range of the frontmatter script, if the document has a marker pair.
///
/// The range starts after the opening marker's line break and ends at the
/// start of the closing marker line.
#[must_use]
pub fn script_region(text: &str) -> Option<Range<usize>> {
    let mut lines = text.split_inclusive('\n');
    let opening = lines.next()?;
    if !opening.ends_with('\n') || !is_marker_line(opening) {
        return None;
    }

    let start = opening.len();
    let mut offset = start;
    for line in lines {
        if is_marker_line(line) {
            return Some(start..offset);
        }
        offset += line.len();
    }
    None
}

/// Clean a Frontmatter document.
///
/// # Errors
/// Returns [`CleanError::Parse`] when the script region does not parse.
pub fn clean(
    text: &str,
    fallback: FrontmatterFallback,
    options: &ExcisionOptions,
) -> Result<Excision, CleanError> {
    let region = match (script_region(text), fallback) {
        (Some(region), _) => region,
        (None, FrontmatterFallback::ScanWhole) => {
            debug!("no frontmatter markers, scanning whole document");
            0..text.len()
        }
        (None, FrontmatterFallback::Skip) => {
            debug!("no frontmatter markers, leaving document unchanged");
            return Ok(Excision::unchanged(text));
        }
    };

    let local = collect_spans(
        &text[region.clone()],
        ScriptFlavor::TypeScript,
        ScriptForm::Program,
        Dialect::Frontmatter,
        options,
    )
    .map_err(|err| match err {
        CleanError::Parse {
            dialect,
            diagnostic,
        } => CleanError::parse(dialect, relocate(diagnostic, text, region.start)),
        other => other,
    })?;
    if local.is_empty() {
        return Ok(Excision::unchanged(text));
    }

    let mut spans = SpanSet::new();
    spans.absorb(&local, region.start)?;
    Ok(Excision::modified(spans.excise(text)?, spans.len()))
}

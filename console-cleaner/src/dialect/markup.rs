//! Markup single-file components (`.svelte`).
//!
//! Script elements and `{…}` expressions are located by one pass over the
//! markup, each is run through the excision engine, and the resulting
//! spans are applied to the original document in a single excision.

use super::scan::{
    diagnostic_at, find_close_tag, lang_attr, matching_brace, read_open_tag, relocate,
    skip_comment,
};
use super::{Dialect, Excision};
use crate::engine::{collect_spans, ExcisionOptions, ScriptForm};
use crate::error::CleanError;
use crate::fix::SpanSet;
use crate::syntax::{ParseDiagnostic, ScriptFlavor};
use std::ops::Range;
use tracing::trace;

/// A script-bearing region of a markup document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRegion {
    /// Byte range of the region's source within the document
    pub range: Range<usize>,
    /// Whether the region is a program or a single expression
    pub form: ScriptForm,
    /// Grammar for the region
    pub flavor: ScriptFlavor,
}

/// Block tags (`{#if}`, `{:else}`, `{/each}`, `{@html}`) carry no
/// removable statements.
fn is_block_tag(inner: &str) -> bool {
    matches!(inner.trim_start().chars().next(), Some('#' | ':' | '/' | '@'))
}

/// Locate every script element and markup expression in `text`.
///
/// `<style>` elements and HTML comments are skipped whole.
///
/// # Errors
/// Returns a diagnostic for an unclosed `<script>` or an unbalanced `{`.
pub fn scan_regions(text: &str) -> Result<Vec<ScriptRegion>, ParseDiagnostic> {
    let mut regions = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(['<', '{']) {
        let at = pos + rel;

        if text[at..].starts_with('{') {
            let close = matching_brace(text, at)
                .ok_or_else(|| diagnostic_at(text, at, "unbalanced `{` in markup"))?;
            let inner = &text[at + 1..close];
            let trimmed = inner.trim();
            if !trimmed.is_empty() && !trimmed.starts_with("...") && !is_block_tag(inner) {
                regions.push(ScriptRegion {
                    range: at + 1..close,
                    form: ScriptForm::Expression,
                    flavor: ScriptFlavor::TypeScript,
                });
            }
            pos = close + 1;
            continue;
        }

        if text[at..].starts_with("<!--") {
            pos = skip_comment(text, at);
            continue;
        }

        let Some(tag) = read_open_tag(text, at) else {
            pos = at + 1;
            continue;
        };
        let raw_text = tag.is("script") || tag.is("style");
        if !raw_text || tag.self_closing {
            // Attributes may hold expressions; resume right after the name.
            pos = at + 1 + tag.name.len();
            continue;
        }

        let open_end = tag.span.1;
        let close = find_close_tag(text, open_end, tag.name)
            .ok_or_else(|| diagnostic_at(text, at, format!("unclosed <{}> element", tag.name)))?;
        if tag.is("script") {
            regions.push(ScriptRegion {
                range: open_end..close.start,
                form: ScriptForm::Program,
                flavor: ScriptFlavor::from_lang_attr(lang_attr(tag.text(text))),
            });
        }
        pos = close.end;
    }

    Ok(regions)
}

/// Clean a Markup-SFC document.
///
/// # Errors
/// Returns [`CleanError::Parse`] if the markup or any region fails to
/// parse; nothing is removed in that case.
pub fn clean(text: &str, options: &ExcisionOptions) -> Result<Excision, CleanError> {
    let regions = scan_regions(text).map_err(|diag| CleanError::parse(Dialect::MarkupSfc, diag))?;
    trace!(regions = regions.len(), "scanned markup");

    let mut spans = SpanSet::new();
    for region in &regions {
        let local = collect_spans(
            &text[region.range.clone()],
            region.flavor,
            region.form,
            Dialect::MarkupSfc,
            options,
        )
        .map_err(|err| match err {
            CleanError::Parse {
                dialect,
                diagnostic,
            } => CleanError::parse(dialect, relocate(diagnostic, text, region.range.start)),
            other => other,
        })?;
        spans.absorb(&local, region.range.start)?;
    }

    if spans.is_empty() {
        return Ok(Excision::unchanged(text));
    }
    Ok(Excision::modified(spans.excise(text)?, spans.len()))
}

//! Boxed single-file components (`.vue`).
//!
//! The document is split into its top-level blocks. Script blocks go
//! through the excision engine, the template goes through a
//! [`TemplateCompiler`], and the component is reassembled from the parts.

use super::scan::{
    diagnostic_at, find_balanced_close, find_close_tag, lang_attr, read_open_tag, relocate,
    skip_comment,
};
use super::{Dialect, Excision};
use crate::constants::VUE_INTEGRATION;
use crate::engine::{collect_spans, ExcisionOptions, ScriptForm};
use crate::error::CleanError;
use crate::syntax::{ParseDiagnostic, ScriptFlavor};
use rustc_hash::FxHashSet;
use std::ops::Range;
use tracing::debug;

/// Compiles a component template.
///
/// Treated as opaque: whatever the compiler returns becomes the new
/// template body.
pub trait TemplateCompiler: Send + Sync {
    /// Compile `source` (the template block's inner content).
    ///
    /// # Errors
    /// Returns a human-readable message when compilation fails.
    fn compile(&self, source: &str) -> Result<String, String>;
}

/// Compiler that returns the template unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCompiler;

impl TemplateCompiler for PassthroughCompiler {
    fn compile(&self, source: &str) -> Result<String, String> {
        Ok(source.to_owned())
    }
}

/// Names of the framework integrations the host build has enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Integrations {
    active: FxHashSet<String>,
}

impl Integrations {
    /// Integration set with the given names active
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: names
                .into_iter()
                .map(|n| n.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Mark `name` active
    pub fn insert(&mut self, name: &str) {
        self.active.insert(name.to_ascii_lowercase());
    }

    /// Whether `name` is active
    #[must_use]
    pub fn integration_active(&self, name: &str) -> bool {
        self.active.contains(&name.to_ascii_lowercase())
    }

    /// Active names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.active.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Kind of top-level block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Template,
    Script,
    Other,
}

/// A top-level component block
#[derive(Debug, Clone)]
struct Block<'a> {
    kind: BlockKind,
    open_tag: &'a str,
    content: Range<usize>,
    outer: Range<usize>,
}

fn split_blocks(text: &str) -> Result<Vec<Block<'_>>, ParseDiagnostic> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find('<') {
        let at = pos + rel;
        if text[at..].starts_with("<!--") {
            pos = skip_comment(text, at);
            continue;
        }
        let Some(tag) = read_open_tag(text, at) else {
            pos = at + 1;
            continue;
        };

        let kind = if tag.is("template") {
            BlockKind::Template
        } else if tag.is("script") {
            BlockKind::Script
        } else {
            BlockKind::Other
        };
        let open_end = tag.span.1;

        if tag.self_closing {
            blocks.push(Block {
                kind,
                open_tag: tag.text(text),
                content: open_end..open_end,
                outer: at..open_end,
            });
            pos = open_end;
            continue;
        }

        let close = if kind == BlockKind::Template {
            find_balanced_close(text, open_end, tag.name)
        } else {
            find_close_tag(text, open_end, tag.name)
        }
        .ok_or_else(|| diagnostic_at(text, at, format!("unclosed <{}> block", tag.name)))?;

        blocks.push(Block {
            kind,
            open_tag: tag.text(text),
            content: open_end..close.start,
            outer: at..close.end,
        });
        pos = close.end;
    }
    Ok(blocks)
}

/// Clean a Boxed-SFC document.
///
/// # Errors
/// - [`CleanError::MissingIntegration`] when `vue` is not active or no
///   compiler is configured
/// - [`CleanError::Parse`] for an unclosed block or a script block that
///   does not parse
/// - [`CleanError::TemplateCompile`] when the compiler fails
pub fn clean(
    text: &str,
    integrations: &Integrations,
    compiler: Option<&dyn TemplateCompiler>,
    options: &ExcisionOptions,
) -> Result<Excision, CleanError> {
    let compiler = compiler
        .filter(|_| integrations.integration_active(VUE_INTEGRATION))
        .ok_or(CleanError::MissingIntegration {
            dialect: Dialect::BoxedSfc,
            integration: VUE_INTEGRATION,
        })?;

    let blocks =
        split_blocks(text).map_err(|diag| CleanError::parse(Dialect::BoxedSfc, diag))?;

    let mut removed = 0;
    let mut scripts = Vec::new();
    for block in blocks.iter().filter(|b| b.kind == BlockKind::Script) {
        let content = &text[block.content.clone()];
        let flavor = ScriptFlavor::from_lang_attr(lang_attr(block.open_tag));
        let spans = collect_spans(content, flavor, ScriptForm::Program, Dialect::BoxedSfc, options)
            .map_err(|err| match err {
                CleanError::Parse {
                    dialect,
                    diagnostic,
                } => CleanError::parse(dialect, relocate(diagnostic, text, block.content.start)),
                other => other,
            })?;
        removed += spans.len();
        scripts.push(format!("{}{}</script>", block.open_tag, spans.excise(content)?));
    }

    let template = blocks.iter().find(|b| b.kind == BlockKind::Template);
    let template_dirty = template.is_some_and(|b| text[b.content.clone()].contains("console."));
    if removed == 0 && !template_dirty {
        return Ok(Excision::unchanged(text));
    }

    let mut parts = Vec::with_capacity(blocks.len());
    if let Some(block) = template {
        debug!("recompiling component template");
        let original = &text[block.content.clone()];
        let compiled = compiler
            .compile(original)
            .map_err(|message| CleanError::TemplateCompile { message })?;
        if removed == 0 && compiled == original {
            return Ok(Excision::unchanged(text));
        }
        parts.push(format!("{}{compiled}</template>", block.open_tag));
    }
    parts.extend(scripts);
    parts.extend(
        blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Other)
            .map(|b| text[b.outer.clone()].to_owned()),
    );

    let mut output = parts.join("\n\n");
    output.push('\n');
    Ok(Excision::modified(output, removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = r#"<template>
  <div @click="console.log('x')">
    <template v-if="ok"><span>{{ msg }}</span></template>
  </div>
</template>

<script setup lang="ts">
import { ref } from 'vue';
const msg = ref<string>('hi');
console.log(msg.value);
</script>

<style scoped>
.a { color: red; }
</style>
"#;

    fn vue() -> Integrations {
        Integrations::new(["vue"])
    }

    fn run(text: &str) -> Result<Excision, CleanError> {
        clean(
            text,
            &vue(),
            Some(&PassthroughCompiler),
            &ExcisionOptions::default(),
        )
    }

    struct FailingCompiler;

    impl TemplateCompiler for FailingCompiler {
        fn compile(&self, _source: &str) -> Result<String, String> {
            Err("unexpected token".to_owned())
        }
    }

    #[test]
    fn test_split_blocks() {
        let blocks = split_blocks(COMPONENT).unwrap();
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Template, BlockKind::Script, BlockKind::Other]
        );
        assert!(COMPONENT[blocks[0].content.clone()].contains("v-if"));
        assert_eq!(blocks[1].open_tag, r#"<script setup lang="ts">"#);
    }

    #[test]
    fn test_script_cleaned_rest_preserved() {
        let out = run(COMPONENT).unwrap();
        assert_eq!(out.text, COMPONENT.replace("console.log(msg.value);", ""));
        assert_eq!(out.removed, 1);
    }

    #[test]
    fn test_two_script_blocks() {
        let text = "<script>\nexport default { name: 'A' };\nconsole.info('a');\n</script>\n\n<script setup>\nconsole.warn('b');\nconst b = 1;\n</script>\n";
        let out = run(text).unwrap();
        assert_eq!(
            out.text,
            "<script>\nexport default { name: 'A' };\n\n</script>\n\n<script setup>\n\nconst b = 1;\n</script>\n"
        );
        assert_eq!(out.removed, 2);
    }

    #[test]
    fn test_reassembly_order() {
        let text = "<script>\nconsole.log(1);\n</script>\n<template><p/></template>\n";
        let out = run(text).unwrap();
        assert_eq!(
            out.text,
            "<template><p/></template>\n\n<script>\n\n</script>\n"
        );
    }

    #[test]
    fn test_clean_component_untouched() {
        let text = "<template>\n  <p>{{ a }}</p>\n</template>\n<script>\nconst a = 1\n</script>";
        let out = run(text).unwrap();
        assert_eq!(out, Excision::unchanged(text));
    }

    #[test]
    fn test_template_console_text_alone_is_untouched() {
        let text = "<!-- header -->\n<template>\n  <p @click=\"console.log(1)\">x</p>\n</template>\n<script>\nexport default {}\n</script>\n";
        let out = run(text).unwrap();
        assert_eq!(out, Excision::unchanged(text));
    }

    #[test]
    fn test_missing_integration() {
        let err = clean(
            COMPONENT,
            &Integrations::default(),
            Some(&PassthroughCompiler),
            &ExcisionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CleanError::MissingIntegration {
                integration: "vue",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_compiler() {
        let err = clean(COMPONENT, &vue(), None, &ExcisionOptions::default()).unwrap_err();
        assert!(matches!(err, CleanError::MissingIntegration { .. }));
    }

    #[test]
    fn test_compiler_failure() {
        let err = clean(
            COMPONENT,
            &vue(),
            Some(&FailingCompiler),
            &ExcisionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CleanError::TemplateCompile { .. }));
    }

    #[test]
    fn test_unclosed_block() {
        let err = run("<template><p/></template>\n<script>\nconsole.log(1);\n").unwrap_err();
        assert!(matches!(
            err,
            CleanError::Parse {
                dialect: Dialect::BoxedSfc,
                ..
            }
        ));
    }

    #[test]
    fn test_script_parse_error_is_located_in_document() {
        let err = run("<template><p/></template>\n<script>\nconst = 1;\n</script>\n").unwrap_err();
        let CleanError::Parse { diagnostic, .. } = &err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(diagnostic.line, 3);
    }

    #[test]
    fn test_integration_names_case_insensitive() {
        let mut integrations = Integrations::default();
        integrations.insert("Vue");
        assert!(integrations.integration_active("vue"));
        assert_eq!(integrations.names(), vec!["vue"]);
    }
}

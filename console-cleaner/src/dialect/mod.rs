//! Dialect detection and dispatch.
//!
//! Maps a file extension to the handler that knows where script lives in
//! that dialect, and runs it through the excision engine.

pub mod boxed;
pub mod frontmatter;
pub mod markup;
mod scan;

use crate::engine::{strip_script, ExcisionOptions};
use crate::error::CleanError;
use crate::syntax::ScriptFlavor;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

pub use boxed::{Integrations, PassthroughCompiler, TemplateCompiler};
pub use frontmatter::FrontmatterFallback;

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// JavaScript / TypeScript family
    PlainScript(ScriptFlavor),
    /// Script block between `---` markers ahead of a template body (`.astro`)
    Frontmatter,
    /// Separate template / script / style blocks (`.vue`)
    BoxedSfc,
    /// Markup with inline script and expressions, one tree (`.svelte`)
    MarkupSfc,
}

impl Dialect {
    /// Dialect for a file extension, `None` when no handler exists.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        if let Some(flavor) = ScriptFlavor::from_extension(ext) {
            return Some(Self::PlainScript(flavor));
        }
        match ext.to_ascii_lowercase().as_str() {
            "astro" => Some(Self::Frontmatter),
            "vue" => Some(Self::BoxedSfc),
            "svelte" => Some(Self::MarkupSfc),
            _ => None,
        }
    }

    /// Dialect for a path, by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainScript(flavor) => write!(f, "{flavor}"),
            Self::Frontmatter => f.write_str("astro"),
            Self::BoxedSfc => f.write_str("vue"),
            Self::MarkupSfc => f.write_str("svelte"),
        }
    }
}

/// Result of cleaning one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excision {
    /// Transformed text (equal to the input when nothing qualified)
    pub text: String,
    /// Number of spans deleted
    pub removed: usize,
    /// Why the handler declined to transform, if it did
    pub skipped: Option<String>,
}

impl Excision {
    /// The input, untouched
    #[must_use]
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            removed: 0,
            skipped: None,
        }
    }

    /// A transformed document
    #[must_use]
    pub fn modified(text: String, removed: usize) -> Self {
        Self {
            text,
            removed,
            skipped: None,
        }
    }

    /// The input, untouched, with the reason it was not processed
    #[must_use]
    pub fn skipped(text: &str, reason: impl Into<String>) -> Self {
        Self {
            text: text.to_owned(),
            removed: 0,
            skipped: Some(reason.into()),
        }
    }
}

/// Everything a handler may need, shared read-only across threads
#[derive(Clone, Default)]
pub struct Transformer {
    /// Engine options
    pub excision: ExcisionOptions,
    /// Policy for Frontmatter documents without a marker pair
    pub frontmatter_fallback: FrontmatterFallback,
    /// Integrations the host build declares active
    pub integrations: Integrations,
    /// Template compiler for Boxed-SFC documents
    pub template_compiler: Option<Arc<dyn TemplateCompiler>>,
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("excision", &self.excision)
            .field("frontmatter_fallback", &self.frontmatter_fallback)
            .field("integrations", &self.integrations)
            .field("template_compiler", &self.template_compiler.is_some())
            .finish()
    }
}

impl Transformer {
    /// Create a transformer with the given engine options
    #[must_use]
    pub fn new(excision: ExcisionOptions) -> Self {
        Self {
            excision,
            ..Self::default()
        }
    }

    /// Builder-style method to set the frontmatter fallback policy.
    #[must_use]
    pub fn with_frontmatter_fallback(mut self, fallback: FrontmatterFallback) -> Self {
        self.frontmatter_fallback = fallback;
        self
    }

    /// Builder-style method to set the active integrations.
    #[must_use]
    pub fn with_integrations(mut self, integrations: Integrations) -> Self {
        self.integrations = integrations;
        self
    }

    /// Builder-style method to set the template compiler.
    #[must_use]
    pub fn with_template_compiler(mut self, compiler: Arc<dyn TemplateCompiler>) -> Self {
        self.template_compiler = Some(compiler);
        self
    }

    /// Clean `text` as `dialect`.
    ///
    /// Soft failures (Boxed-SFC without its integration, Markup-SFC that
    /// does not parse) come back as a skipped [`Excision`] with the text
    /// unchanged and a warning logged.
    ///
    /// # Errors
    /// Returns the handler's error for hard failures; the caller must not
    /// write anything in that case.
    pub fn transform(&self, text: &str, dialect: Dialect) -> Result<Excision, CleanError> {
        let result = match dialect {
            Dialect::PlainScript(flavor) => strip_script(text, flavor, dialect, &self.excision),
            Dialect::Frontmatter => {
                frontmatter::clean(text, self.frontmatter_fallback, &self.excision)
            }
            Dialect::BoxedSfc => boxed::clean(
                text,
                &self.integrations,
                self.template_compiler.as_deref(),
                &self.excision,
            ),
            Dialect::MarkupSfc => markup::clean(text, &self.excision),
        };

        match result {
            Err(err @ CleanError::MissingIntegration { .. }) => {
                warn!("{err}; leaving document unchanged");
                Ok(Excision::skipped(text, err.to_string()))
            }
            Err(err @ CleanError::Parse { .. }) if dialect == Dialect::MarkupSfc => {
                warn!("{err}; leaving document unchanged");
                Ok(Excision::skipped(text, err.to_string()))
            }
            other => other,
        }
    }

    /// Clean the file at `path` (already read into `text`), choosing the
    /// dialect from its extension. Unknown extensions are a no-op.
    ///
    /// # Errors
    /// Same as [`Transformer::transform`].
    pub fn transform_path(&self, path: &Path, text: &str) -> Result<Excision, CleanError> {
        match Dialect::from_path(path) {
            Some(dialect) => self.transform(text, dialect),
            None => Ok(Excision::unchanged(text)),
        }
    }
}

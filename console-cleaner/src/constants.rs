use regex::Regex;
use std::sync::OnceLock;

/// Name of the project configuration file.
pub const CONFIG_FILENAME: &str = ".console-cleaner.toml";

/// Alternative, non-hidden configuration file name.
pub const ALT_CONFIG_FILENAME: &str = "console-cleaner.toml";

/// Identifier whose member calls are removed.
pub const CONSOLE_IDENT: &str = "console";

/// Frontmatter delimiter line.
pub const FRONTMATTER_MARKER: &str = "---";

/// Integration name a Boxed-SFC document depends on.
pub const VUE_INTEGRATION: &str = "vue";

/// Number of files to process per chunk in parallel processing.
/// Keeps the number of documents held in memory at once bounded.
pub const CHUNK_SIZE: usize = 500;

/// Console members removed when no method list is configured.
pub fn get_default_methods() -> &'static [&'static str] {
    &["log", "warn", "error", "info", "debug", "trace"]
}

/// Path substrings skipped during traversal by default.
pub fn get_default_ignore() -> &'static [&'static str] {
    &[
        ".git",
        "node_modules",
        "dist",
        "build",
        "public",
        ".cache",
        ".vscode",
        "coverage",
        "test",
    ]
}

/// File-name suffixes accepted during traversal by default.
///
/// Markdown suffixes are accepted here but have no dialect handler, so
/// they are filtered out again before any file is read.
pub fn get_default_match() -> &'static [&'static str] {
    &[
        ".ts", ".js", ".jsx", ".tsx", ".vue", ".astro", ".svelte", ".md", ".mdx", ".cjs", ".mjs",
        ".mts", ".cts",
    ]
}

/// Node kinds whose children form a statement list.
///
/// An expression statement directly inside one of these can be deleted
/// without changing how its neighbours parse.
pub fn get_statement_lists() -> &'static [&'static str] {
    &["program", "statement_block", "switch_case", "switch_default"]
}

/// Regex for the `lang` attribute on a `<script>` open tag.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_lang_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r#"\blang\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
            .expect("Invalid lang attribute regex pattern")
    })
}

pub use get_default_ignore as DEFAULT_IGNORE;
pub use get_default_match as DEFAULT_MATCH;
pub use get_default_methods as DEFAULT_METHODS;
pub use get_lang_attr_re as LANG_ATTR_RE;
pub use get_statement_lists as STATEMENT_LISTS;

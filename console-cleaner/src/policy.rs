//! Path filters applied during traversal.

use crate::constants::{DEFAULT_IGNORE, DEFAULT_MATCH};
use serde::{Deserialize, Serialize};

/// Substring tokens that exclude a path (and, for directories, its subtree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePolicy {
    tokens: Vec<String>,
}

impl IgnorePolicy {
    /// Policy with exactly these tokens
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }

    /// Builder-style method to append tokens.
    #[must_use]
    pub fn with_extra<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            let token = token.into();
            if !token.is_empty() && !self.tokens.contains(&token) {
                self.tokens.push(token);
            }
        }
        self
    }

    /// Whether `relative` (a root-relative path with `/` separators)
    /// contains any token.
    #[must_use]
    pub fn is_ignored(&self, relative: &str) -> bool {
        self.tokens.iter().any(|t| relative.contains(t.as_str()))
    }

    /// Configured tokens, in order
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE().iter().copied())
    }
}

/// How [`MatchPolicy`] patterns are compared against file names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// File name ends with the pattern
    #[default]
    Suffix,
    /// File name contains the pattern
    Substring,
}

/// Patterns a file name must match to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPolicy {
    patterns: Vec<String>,
    mode: MatchMode,
}

impl MatchPolicy {
    /// Policy with exactly these patterns, suffix mode
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            mode: MatchMode::default(),
        }
    }

    /// Builder-style method to set the comparison mode.
    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether a file called `name` is accepted
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| match self.mode {
            MatchMode::Suffix => name.ends_with(p.as_str()),
            MatchMode::Substring => name.contains(p.as_str()),
        })
    }

    /// Configured patterns, in order
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Comparison mode
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignore_tokens() {
        let policy = IgnorePolicy::default();
        assert!(policy.is_ignored("node_modules/pkg/index.js"));
        assert!(policy.is_ignored("packages/app/dist/main.js"));
        assert!(policy.is_ignored(".git"));
        assert!(!policy.is_ignored("src/app.ts"));
        assert!(!policy.is_ignored(""));
    }

    #[test]
    fn test_ignore_is_substring_match() {
        let policy = IgnorePolicy::new(["test"]);
        assert!(policy.is_ignored("src/latest.js"));
        assert!(policy.is_ignored("tests/a.ts"));
    }

    #[test]
    fn test_with_extra_dedups_and_drops_empty() {
        let policy = IgnorePolicy::new(["a"]).with_extra(["a", "", "b"]);
        assert_eq!(policy.tokens(), ["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_default_match_suffixes() {
        let policy = MatchPolicy::default();
        for name in ["a.ts", "b.vue", "c.astro", "d.svelte", "e.mjs", "f.md"] {
            assert!(policy.accepts(name), "{name}");
        }
        assert!(!policy.accepts("style.css"));
        assert!(!policy.accepts("data.json"));
    }

    #[test]
    fn test_substring_mode() {
        let policy = MatchPolicy::new([".js"]).with_mode(MatchMode::Substring);
        assert!(policy.accepts("bundle.js.map"));
        assert!(!MatchPolicy::new([".js"]).accepts("bundle.js.map"));
    }
}

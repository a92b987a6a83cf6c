//! Tree-sitter parser wrapper for JavaScript, TypeScript and TSX.
//!
//! Provides byte-precise trees plus a readable diagnostic when the
//! grammar reports errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use tree_sitter::{Language, Node, Parser, Tree};

/// Longest snippet quoted in a diagnostic message
const SNIPPET_LIMIT: usize = 24;

/// Grammar used for a script region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFlavor {
    /// ECMAScript with JSX
    JavaScript,
    /// TypeScript without JSX
    TypeScript,
    /// TypeScript with JSX
    Tsx,
}

impl ScriptFlavor {
    /// Flavor for a plain script file extension, if it is one.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Flavor for an embedded `<script lang="…">` block.
    ///
    /// Embedded scripts default to TypeScript, which also accepts plain
    /// JavaScript without JSX.
    #[must_use]
    pub fn from_lang_attr(lang: Option<&str>) -> Self {
        match lang.map(str::to_ascii_lowercase).as_deref() {
            Some("js" | "javascript" | "jsx") => Self::JavaScript,
            Some("tsx") => Self::Tsx,
            _ => Self::TypeScript,
        }
    }

    fn language(self) -> Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl fmt::Display for ScriptFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        };
        f.write_str(name)
    }
}

/// Where and why a region failed to parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// One-indexed line within the parsed buffer
    pub line: usize,
    /// One-indexed byte column within the line
    pub column: usize,
    /// Human-readable description
    pub message: String,
}

impl ParseDiagnostic {
    fn at(node: Node<'_>, message: String) -> Self {
        let pos = node.start_position();
        Self {
            line: pos.row + 1,
            column: pos.column + 1,
            message,
        }
    }

    fn whole_buffer(message: impl Into<String>) -> Self {
        Self {
            line: 1,
            column: 1,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// A parsed script region borrowing the text it was parsed from
pub struct SyntaxTree<'s> {
    tree: Tree,
    source: &'s str,
}

impl<'s> SyntaxTree<'s> {
    /// Root node of the tree
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The parsed buffer
    #[must_use]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Source text covered by `node`
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    /// First error or missing node, if the grammar reported any
    #[must_use]
    pub fn first_error(&self) -> Option<ParseDiagnostic> {
        let root = self.root();
        if !root.has_error() {
            return None;
        }

        let mut stack = vec![root];
        let mut cursor = root.walk();
        while let Some(node) = stack.pop() {
            if node.is_missing() {
                return Some(ParseDiagnostic::at(
                    node,
                    format!("missing `{}`", node.kind()),
                ));
            }
            if node.is_error() {
                return Some(ParseDiagnostic::at(
                    node,
                    format!("unexpected `{}`", snippet(self.text(node))),
                ));
            }
            if node.has_error() {
                let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }

        Some(ParseDiagnostic::whole_buffer("syntax error"))
    }
}

fn snippet(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() > SNIPPET_LIMIT {
        let cut: String = line.chars().take(SNIPPET_LIMIT).collect();
        format!("{cut}…")
    } else {
        line.to_owned()
    }
}

/// Tree-sitter parser bound to one script flavor
pub struct ScriptParser {
    parser: Parser,
    flavor: ScriptFlavor,
}

impl ScriptParser {
    /// Create a parser for `flavor`
    ///
    /// # Errors
    /// Returns a diagnostic if the grammar cannot be loaded.
    pub fn new(flavor: ScriptFlavor) -> Result<Self, ParseDiagnostic> {
        let mut parser = Parser::new();
        parser.set_language(&flavor.language()).map_err(|e| {
            ParseDiagnostic::whole_buffer(format!("failed to load {flavor} grammar: {e}"))
        })?;
        Ok(Self { parser, flavor })
    }

    /// The flavor this parser was created for
    #[must_use]
    pub fn flavor(&self) -> ScriptFlavor {
        self.flavor
    }

    /// Parse `source`, rejecting input the grammar could not fully accept.
    ///
    /// # Errors
    /// Returns the first error location when the tree contains error or
    /// missing nodes.
    pub fn parse<'s>(&mut self, source: &'s str) -> Result<SyntaxTree<'s>, ParseDiagnostic> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseDiagnostic::whole_buffer("parser produced no tree"))?;

        let tree = SyntaxTree { tree, source };
        match tree.first_error() {
            Some(diagnostic) => Err(diagnostic),
            None => Ok(tree),
        }
    }
}

//! Plain-syntax excision engine.
//!
//! Parses a JavaScript/TypeScript buffer, finds every qualifying
//! `console.<method>(…)` call and deletes it. A call qualifies only when it
//! is the whole expression of an expression statement; calls used as
//! values (arguments, initialisers, arrow bodies, sequence members) are
//! never touched, so the output stays syntactically valid.

use crate::constants::{CONSOLE_IDENT, DEFAULT_METHODS, STATEMENT_LISTS};
use crate::dialect::{Dialect, Excision};
use crate::error::CleanError;
use crate::fix::{CallSpan, RewriteError, SpanSet};
use crate::syntax::{walk, CallExpr, MemberAccess, ScriptFlavor, ScriptParser, Visitor, Walk};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// Set of `console` members whose calls are removable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMethodSet {
    methods: FxHashSet<String>,
    any: bool,
}

impl ConsoleMethodSet {
    /// Exactly the given member names
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            any: false,
        }
    }

    /// Every member of `console`
    #[must_use]
    pub fn all() -> Self {
        Self {
            methods: FxHashSet::default(),
            any: true,
        }
    }

    /// Whether calls to `console.<name>` are removable
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.any || self.methods.contains(name)
    }

    /// True when no call can ever qualify
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.any && self.methods.is_empty()
    }

    /// True when every member qualifies
    #[must_use]
    pub fn matches_any(&self) -> bool {
        self.any
    }

    /// Configured names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ConsoleMethodSet {
    fn default() -> Self {
        Self::new(DEFAULT_METHODS().iter().copied())
    }
}

/// How much source a qualifying call takes with it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Only the call expression; the statement terminator stays
    Expression,
    /// The enclosing expression statement, terminator included
    #[default]
    Statement,
    /// The statement plus its indentation and line break when it sits
    /// alone on its line
    Line,
}

/// Engine configuration shared by every dialect handler
#[derive(Debug, Clone, Default)]
pub struct ExcisionOptions {
    /// Members whose calls are removed
    pub methods: ConsoleMethodSet,
    /// Removal granularity
    pub granularity: Granularity,
}

/// What a script buffer contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptForm {
    /// A module or script body
    Program,
    /// A single expression, as found in markup attributes and mustaches
    Expression,
}

struct ConsoleCallCollector<'s, 'o> {
    source: &'s str,
    options: &'o ExcisionOptions,
    spans: SpanSet,
    error: Option<RewriteError>,
}

impl<'s, 'o> ConsoleCallCollector<'s, 'o> {
    fn new(source: &'s str, options: &'o ExcisionOptions) -> Self {
        Self {
            source,
            options,
            spans: SpanSet::new(),
            error: None,
        }
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    fn is_console_call(&self, call: &CallExpr<'_>) -> bool {
        let Some(member) = call.callee.and_then(MemberAccess::from_node) else {
            return false;
        };
        let (Some(object), Some(property)) = (member.object, member.property) else {
            return false;
        };
        object.kind() == "identifier"
            && self.text(object) == CONSOLE_IDENT
            && property.kind() == "property_identifier"
            && self.options.methods.contains(self.text(property))
    }

    /// Span to delete for a qualifying call, or `None` to leave it alone.
    fn removal_span(&self, call: Node<'_>) -> Option<CallSpan> {
        let statement = call.parent()?;
        if statement.kind() != "expression_statement" {
            return None;
        }
        // A labelled call (`$: console.log(x);`) goes together with its label.
        let mut statement = statement;
        while let Some(labeled) = statement
            .parent()
            .filter(|p| p.kind() == "labeled_statement")
        {
            statement = labeled;
        }
        let call_span = CallSpan::new(call.start_byte(), call.end_byte());
        let statement_span = CallSpan::new(statement.start_byte(), statement.end_byte());

        // A lone statement body (`if (x) console.log(x);`) must keep a
        // statement in place or the next statement becomes the body.
        let in_list = statement
            .parent()
            .is_none_or(|p| STATEMENT_LISTS().contains(&p.kind()));
        if !in_list {
            return self.text(statement).ends_with(';').then_some(call_span);
        }

        Some(match self.options.granularity {
            Granularity::Expression => call_span,
            Granularity::Statement => statement_span,
            Granularity::Line => widen_to_line(self.source, statement_span),
        })
    }
}

impl<'t> Visitor<'t> for ConsoleCallCollector<'_, '_> {
    fn visit_call(&mut self, call: &CallExpr<'t>) -> Walk {
        if self.error.is_some() || !self.is_console_call(call) {
            return Walk::Descend;
        }
        let Some(span) = self.removal_span(call.node) else {
            return Walk::Descend;
        };
        if let Err(e) = self.spans.insert(span) {
            self.error = Some(e);
        }
        Walk::Skip
    }
}

/// Grow a statement span to whole lines when nothing else shares them.
fn widen_to_line(source: &str, span: CallSpan) -> CallSpan {
    let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    if !source[line_start..span.start]
        .bytes()
        .all(|b| b == b' ' || b == b'\t')
    {
        return span;
    }

    let rest = &source[span.end..];
    let after = span.end + (rest.len() - rest.trim_start_matches([' ', '\t']).len());
    let tail = &source[after..];
    let end = if tail.starts_with("\r\n") {
        after + 2
    } else if tail.starts_with('\n') {
        after + 1
    } else if tail.is_empty() {
        after
    } else {
        return span;
    };
    CallSpan::new(line_start, end)
}

/// Collect the deletion spans for `source` without applying them.
///
/// Spans are relative to `source`. For [`ScriptForm::Expression`] the
/// buffer is parsed as a parenthesised expression, so a call that *is*
/// the expression is a value and never removed.
///
/// # Errors
/// Returns [`CleanError::Parse`] tagged with `dialect` when the buffer
/// does not parse.
pub fn collect_spans(
    source: &str,
    flavor: ScriptFlavor,
    form: ScriptForm,
    dialect: Dialect,
    options: &ExcisionOptions,
) -> Result<SpanSet, CleanError> {
    if options.methods.is_empty() {
        return Ok(SpanSet::new());
    }

    let wrapped;
    let (buffer, offset) = match form {
        ScriptForm::Program => (source, 0),
        ScriptForm::Expression => {
            wrapped = format!("({source}\n)");
            (wrapped.as_str(), 1)
        }
    };

    let mut parser = ScriptParser::new(flavor).map_err(|d| CleanError::parse(dialect, d))?;
    let tree = parser
        .parse(buffer)
        .map_err(|d| CleanError::parse(dialect, d))?;

    let mut collector = ConsoleCallCollector::new(buffer, options);
    walk(tree.root(), &mut collector);
    if let Some(e) = collector.error {
        return Err(e.into());
    }

    if offset == 0 {
        return Ok(collector.spans);
    }
    let mut spans = SpanSet::new();
    for span in collector.spans.iter() {
        spans.insert(CallSpan::new(span.start - offset, span.end - offset))?;
    }
    Ok(spans)
}

/// Remove every qualifying call from a plain script buffer.
///
/// # Errors
/// Returns [`CleanError::Parse`] when the buffer does not parse; the text
/// is never partially modified.
pub fn strip_script(
    source: &str,
    flavor: ScriptFlavor,
    dialect: Dialect,
    options: &ExcisionOptions,
) -> Result<Excision, CleanError> {
    let spans = collect_spans(source, flavor, ScriptForm::Program, dialect, options)?;
    if spans.is_empty() {
        return Ok(Excision::unchanged(source));
    }
    Ok(Excision::modified(spans.excise(source)?, spans.len()))
}

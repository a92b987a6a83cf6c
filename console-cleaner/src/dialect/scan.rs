//! Tag and brace scanning shared by the component dialects.

use crate::constants::LANG_ATTR_RE;
use crate::syntax::ParseDiagnostic;
use std::ops::Range;

/// An opening tag found at some `<`
#[derive(Debug, Clone, Copy)]
pub(super) struct OpenTag<'a> {
    /// Tag name as written
    pub name: &'a str,
    /// Byte range of the whole tag, `<` through `>`
    pub span: (usize, usize),
    /// `<name … />`
    pub self_closing: bool,
}

impl<'a> OpenTag<'a> {
    /// Case-insensitive name comparison
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Tag text, `<` through `>`
    pub fn text(&self, src: &'a str) -> &'a str {
        &src[self.span.0..self.span.1]
    }
}

/// Read the opening tag starting at `pos`, which must point at `<`.
///
/// Quoted attribute values and `{…}` attribute expressions may contain
/// `>` without ending the tag.
pub(super) fn read_open_tag(src: &str, pos: usize) -> Option<OpenTag<'_>> {
    let bytes = src.as_bytes();
    if bytes.get(pos) != Some(&b'<') || !bytes.get(pos + 1)?.is_ascii_alphabetic() {
        return None;
    }
    let name_end = bytes[pos + 1..]
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')))
        .map_or(bytes.len(), |n| pos + 1 + n);

    let mut i = name_end;
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    while let Some(&b) = bytes.get(i) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') if depth == 0 => quote = Some(b),
            (None, b'{') => depth += 1,
            (None, b'}') => depth = depth.saturating_sub(1),
            (None, b'>') if depth == 0 => {
                return Some(OpenTag {
                    name: &src[pos + 1..name_end],
                    span: (pos, i + 1),
                    self_closing: i > name_end && bytes[i - 1] == b'/',
                });
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Range of the closing tag `</name …>` starting at `pos`, if there is one.
pub(super) fn read_close_tag(src: &str, pos: usize, name: &str) -> Option<Range<usize>> {
    let bytes = src.as_bytes();
    let name_start = pos + 2;
    let name_end = name_start + name.len();
    if !src[pos..].starts_with("</")
        || bytes.len() < name_end
        || !bytes[name_start..name_end].eq_ignore_ascii_case(name.as_bytes())
        || !matches!(bytes.get(name_end), Some(b'>' | b' ' | b'\t' | b'\n' | b'\r'))
    {
        return None;
    }
    let close = src[name_end..].find('>')?;
    Some(pos..name_end + close + 1)
}

/// First `</name>` at or after `from`.
pub(super) fn find_close_tag(src: &str, from: usize, name: &str) -> Option<Range<usize>> {
    let mut i = from;
    while let Some(rel) = src[i..].find("</") {
        let at = i + rel;
        if let Some(range) = read_close_tag(src, at, name) {
            return Some(range);
        }
        i = at + 2;
    }
    None
}

/// Closing tag matching an element opened before `from`, counting nested
/// elements of the same name.
pub(super) fn find_balanced_close(src: &str, from: usize, name: &str) -> Option<Range<usize>> {
    let mut depth = 1usize;
    let mut i = from;
    while let Some(rel) = src[i..].find('<') {
        let at = i + rel;
        if let Some(range) = read_close_tag(src, at, name) {
            depth -= 1;
            if depth == 0 {
                return Some(range);
            }
            i = range.end;
        } else if let Some(tag) = read_open_tag(src, at).filter(|t| t.is(name)) {
            if !tag.self_closing {
                depth += 1;
            }
            i = tag.span.1;
        } else {
            i = at + 1;
        }
    }
    None
}

/// End of an HTML comment opened at `pos`, or the end of input.
pub(super) fn skip_comment(src: &str, pos: usize) -> usize {
    src[pos + 4..].find("-->").map_or(src.len(), |n| pos + 4 + n + 3)
}

/// Value of the `lang` attribute in an opening tag.
pub(super) fn lang_attr(open_tag: &str) -> Option<&str> {
    let caps = LANG_ATTR_RE().captures(open_tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nest {
    Brace,
    Template,
}

/// Index of the `}` closing the `{` at `open`.
///
/// String and template literals are skipped, including `${…}`
/// substitutions nested inside templates, as are comments and regular
/// expression literals.
pub(super) fn matching_brace(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut stack = vec![Nest::Brace];
    // Last significant byte seen in code position.
    let mut prev = b'{';
    let mut i = open + 1;

    while let Some(&b) = bytes.get(i) {
        match stack.last().copied()? {
            Nest::Template => match b {
                b'\\' => i += 1,
                b'`' => {
                    stack.pop();
                    prev = b'`';
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    stack.push(Nest::Brace);
                    prev = b'{';
                    i += 1;
                }
                _ => {}
            },
            Nest::Brace => match b {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    i = bytes[i..]
                        .iter()
                        .position(|&c| c == b'\n')
                        .map_or(bytes.len(), |n| i + n);
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = src[i + 2..].find("*/").map(|n| i + 2 + n + 1)?;
                }
                b'/' if starts_regex(prev) => {
                    i = regex_end(bytes, i)?;
                    prev = b'/';
                }
                b'\'' | b'"' => {
                    i = string_end(bytes, i)?;
                    prev = b;
                }
                b'`' => {
                    stack.push(Nest::Template);
                    prev = b;
                }
                b'{' => {
                    stack.push(Nest::Brace);
                    prev = b;
                }
                b'}' => {
                    stack.pop();
                    if stack.is_empty() {
                        return Some(i);
                    }
                    prev = b;
                }
                _ if b.is_ascii_whitespace() => {}
                _ => prev = b,
            },
        }
        i += 1;
    }
    None
}

/// Whether a `/` following `prev` opens a regular expression rather than
/// dividing.
fn starts_regex(prev: u8) -> bool {
    b"(,=:[!&|?{};+-*%<>~^".contains(&prev)
}

fn regex_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut in_class = false;
    let mut i = open + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 1,
            b'\n' => return None,
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn string_end(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut i = open + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 1,
            b'\n' => return None,
            _ if b == quote => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Diagnostic pointing at byte `offset` of `src`.
pub(super) fn diagnostic_at(src: &str, offset: usize, message: impl Into<String>) -> ParseDiagnostic {
    let (line, column) = line_column(src, offset);
    ParseDiagnostic {
        line,
        column,
        message: message.into(),
    }
}

/// Move a region-relative diagnostic into document coordinates.
pub(super) fn relocate(diagnostic: ParseDiagnostic, src: &str, region_start: usize) -> ParseDiagnostic {
    let (line, column) = line_column(src, region_start);
    ParseDiagnostic {
        line: line + diagnostic.line - 1,
        column: if diagnostic.line == 1 {
            column + diagnostic.column - 1
        } else {
            diagnostic.column
        },
        message: diagnostic.message,
    }
}

fn line_column(src: &str, offset: usize) -> (usize, usize) {
    let before = &src[..offset.min(src.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
    (line, column)
}

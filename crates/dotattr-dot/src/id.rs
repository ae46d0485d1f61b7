//! DOT identifiers: the text of a token plus the quoting it was written with.

use serde::{Deserialize, Serialize};
use std::fmt;

use winnow::combinator::eof;
use winnow::stream::LocatingSlice;
use winnow::Parser;

/// Keywords that can only appear quoted when used as identifiers.
const KEYWORDS: &[&str] = &["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Quoting discipline of a DOT identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    /// `[A-Za-z_][A-Za-z0-9_]*` (plus non-ASCII characters).
    Bare,
    /// `-?(.[0-9]+|[0-9]+(.[0-9]*)?)`
    Numeral,
    /// `"..."` with `\"` and `\\` escapes.
    Quoted,
    /// `<...>` with balanced angle brackets.
    Html,
}

/// A DOT identifier as written in source.
///
/// `text` holds the decoded content (quotes and escapes removed); [`Id::to_dot`]
/// reproduces the literal token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    text: String,
    kind: IdKind,
}

impl Id {
    pub fn new(text: impl Into<String>, kind: IdKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn bare(text: impl Into<String>) -> Self {
        Self::new(text, IdKind::Bare)
    }

    pub fn numeral(text: impl Into<String>) -> Self {
        Self::new(text, IdKind::Numeral)
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self::new(text, IdKind::Quoted)
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self::new(text, IdKind::Html)
    }

    /// Pick the least quoting that still reproduces `text` losslessly.
    pub fn infer(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if is_bare_identifier(&text) && !is_keyword(&text) {
            IdKind::Bare
        } else if is_numeral(&text) {
            IdKind::Numeral
        } else {
            IdKind::Quoted
        };
        Self { text, kind }
    }

    /// Parse a complete literal token (`abc`, `-1.5`, `"a b"`, `<b>x</b>`).
    pub fn parse_literal(token: &str) -> Option<Id> {
        (crate::parser::id, eof)
            .map(|(id, _)| id)
            .parse(LocatingSlice::new(token))
            .ok()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Render the identifier as a DOT token.
    pub fn to_dot(&self) -> String {
        match self.kind {
            IdKind::Bare | IdKind::Numeral => self.text.clone(),
            IdKind::Quoted => format!("\"{}\"", escape_quoted(&self.text)),
            IdKind::Html => format!("<{}>", self.text),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Id {
    fn from(text: &str) -> Self {
        Id::infer(text)
    }
}

impl From<String> for Id {
    fn from(text: String) -> Self {
        Id::infer(text)
    }
}

/// Escape `"` always, and a backslash only where it would otherwise pair
/// with the next character: before `\\`, `"` or a line break, or at the end.
fn escape_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => {
                out.push('\\');
                if matches!(chars.peek(), None | Some('\\' | '"' | '\n' | '\r')) {
                    out.push('\\');
                }
            }
            other => out.push(other),
        }
    }
    out
}

pub(crate) fn is_keyword(text: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(text))
}

pub(crate) fn is_bare_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

pub(crate) fn is_bare_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

fn is_bare_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if is_bare_start(c) => chars.all(is_bare_continue),
        _ => false,
    }
}

fn is_numeral(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    match digits.split_once('.') {
        Some((int, frac)) => {
            (!int.is_empty() || !frac.is_empty())
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
    }
}

//! Attribute value grammars.
//!
//! Every grammar turns raw attribute text into a [`ParsedValue`] or a
//! [`SyntaxError`] describing the first point where the text was rejected.
//! The structured grammars are `winnow` parsers run through [`run`], which
//! tolerates surrounding whitespace and renders failures in the token
//! vocabulary users see in diagnostics (`RULE_DOUBLE`, `<EOF>`, ...).

mod arrow;
mod color;
mod geometry;
mod keyword;
mod number;
mod style;

use std::fmt;

use winnow::ascii::multispace0;
use winnow::combinator::{cut_err, delimited, eof, terminated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::stream::LocatingSlice;
use winnow::Parser;

use crate::value::{ColorList, ParsedValue};

pub(crate) type Input<'i> = LocatingSlice<&'i str>;

pub(crate) const RULE_DOUBLE: &str = "RULE_DOUBLE";
pub(crate) const RULE_INT: &str = "RULE_INT";
pub(crate) const RULE_HEXADECIMAL_DIGIT: &str = "RULE_HEXADECIMAL_DIGIT";
pub(crate) const RULE_STRING: &str = "RULE_STRING";
pub(crate) const RULE_SHAPE: &str = "RULE_SHAPE";
const EOF: &str = "<EOF>";

pub(crate) fn label(name: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(name))
}

// ---------------------------------------------------------------------------
// SyntaxError
// ---------------------------------------------------------------------------

/// A grammar rejected the raw text. `detail` always ends with a period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct SyntaxError {
    pub offset: usize,
    pub detail: String,
}

impl SyntaxError {
    pub(crate) fn new(offset: usize, detail: impl Into<String>) -> Self {
        Self {
            offset,
            detail: detail.into(),
        }
    }

    /// `Value has to be one of 'a', 'b', 'c'.`
    pub(crate) fn one_of<'a>(keywords: impl IntoIterator<Item = &'a str>) -> Self {
        let quoted: Vec<String> = keywords.into_iter().map(|k| format!("'{k}'")).collect();
        Self::new(0, format!("Value has to be one of {}.", quoted.join(", ")))
    }

    /// Describe a failure at `offset` the way a token-based parser would.
    fn at(text: &str, offset: usize, expected: Option<&'static str>, alphabet: fn(char) -> bool) -> Self {
        let offset = offset.min(text.len());
        let rest = text[offset..].trim_start();
        let detail = match rest.chars().next() {
            None => format!(
                "Mismatched input '<EOF>' expecting {}.",
                expected.unwrap_or(EOF)
            ),
            Some(c) if !alphabet(c) => format!("No viable alternative at character '{c}'."),
            Some(_) => {
                let token = token_at(rest);
                match expected {
                    Some(expected) if expected != EOF => {
                        format!("Mismatched input '{token}' expecting {expected}.")
                    }
                    _ => format!("Extraneous input '{token}' expecting <EOF>."),
                }
            }
        };
        Self::new(offset, detail)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '+' | '#')
}

/// The token starting at the beginning of `rest`.
fn token_at(rest: &str) -> &str {
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, c)) if is_word_char(c) => {
            let end = chars
                .find(|&(_, c)| !is_word_char(c))
                .map_or(rest.len(), |(i, _)| i);
            &rest[..end]
        }
        Some((_, c)) => &rest[..c.len_utf8()],
        None => rest,
    }
}

/// Run a grammar parser over the complete text.
pub(crate) fn run<'i, O, P>(
    text: &'i str,
    alphabet: fn(char) -> bool,
    parser: P,
) -> Result<O, SyntaxError>
where
    P: Parser<Input<'i>, O, ErrMode<ContextError>>,
{
    terminated(
        delimited(multispace0, parser, multispace0),
        cut_err(eof).context(label(EOF)),
    )
    .parse(LocatingSlice::new(text))
    .map_err(|e| {
        let expected = e.inner().context().find_map(|c| match c {
            StrContext::Expected(StrContextValue::Description(d)) => Some(*d),
            _ => None,
        });
        SyntaxError::at(text, e.offset(), expected, alphabet)
    })
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// The closed set of attribute value grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    Double,
    Int,
    Bool,
    Point,
    Rect,
    SplineType,
    Color,
    ColorList,
    ArrowType,
    Style,
    Shape,
    DirType,
    ClusterMode,
    RankDir,
    PageDir,
    Layout,
    OutputMode,
    RankType,
    Splines,
    PortPos,
    EscString,
    String,
}

impl Grammar {
    /// The word used for this grammar in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Grammar::Double => "double",
            Grammar::Int => "int",
            Grammar::Bool => "bool",
            Grammar::Point => "point",
            Grammar::Rect => "rect",
            Grammar::SplineType => "splineType",
            Grammar::Color => "color",
            Grammar::ColorList => "colorList",
            Grammar::ArrowType => "arrowType",
            Grammar::Style => "style",
            Grammar::Shape => "shape",
            Grammar::DirType => "dirType",
            Grammar::ClusterMode => "clusterMode",
            Grammar::RankDir => "rankdir",
            Grammar::PageDir => "pagedir",
            Grammar::Layout => "layout",
            Grammar::OutputMode => "outputMode",
            Grammar::RankType => "rankType",
            Grammar::Splines => "splines",
            Grammar::PortPos => "portPos",
            Grammar::EscString => "escString",
            Grammar::String => "string",
        }
    }

    /// Parse raw attribute text. All-or-nothing: trailing input is an error.
    pub fn parse(&self, text: &str) -> Result<ParsedValue, SyntaxError> {
        tracing::trace!(grammar = self.name(), text, "Parsing attribute value");
        match self {
            Grammar::Double => number::double(text).map(ParsedValue::Double),
            Grammar::Int => number::int(text).map(ParsedValue::Int),
            Grammar::Bool => number::bool(text).map(ParsedValue::Bool),
            Grammar::Point => geometry::point(text).map(ParsedValue::Point),
            Grammar::Rect => geometry::rect(text).map(ParsedValue::Rect),
            Grammar::SplineType => geometry::spline_type(text).map(ParsedValue::SplineType),
            Grammar::Color => color::color(text).map(ParsedValue::Color),
            Grammar::ColorList => color::color_list(text).map(ParsedValue::ColorList),
            Grammar::ArrowType => arrow::arrow_type(text).map(ParsedValue::ArrowType),
            Grammar::Style => style::style(text).map(ParsedValue::Style),
            Grammar::Shape => keyword::shape(text).map(ParsedValue::Shape),
            Grammar::DirType => keyword::dir_type(text).map(ParsedValue::DirType),
            Grammar::ClusterMode => keyword::cluster_mode(text).map(ParsedValue::ClusterMode),
            Grammar::RankDir => keyword::rank_dir(text).map(ParsedValue::RankDir),
            Grammar::PageDir => keyword::page_dir(text).map(ParsedValue::PageDir),
            Grammar::Layout => keyword::layout(text).map(ParsedValue::Layout),
            Grammar::OutputMode => keyword::output_mode(text).map(ParsedValue::OutputMode),
            Grammar::RankType => keyword::rank_type(text).map(ParsedValue::RankType),
            Grammar::Splines => keyword::splines(text).map(ParsedValue::Splines),
            Grammar::PortPos => keyword::port_pos(text).map(ParsedValue::PortPos),
            Grammar::EscString | Grammar::String => Ok(ParsedValue::Text(text.to_string())),
        }
    }

    /// Fit a typed value to this grammar. A single color is accepted where a
    /// color list is expected, and an int where a double is.
    pub fn coerce(&self, value: ParsedValue) -> Option<ParsedValue> {
        match (self, value) {
            (Grammar::ColorList, ParsedValue::Color(c)) => {
                Some(ParsedValue::ColorList(ColorList::single(c)))
            }
            (Grammar::Double, ParsedValue::Int(i)) => Some(ParsedValue::Double(i as f64)),
            (grammar, value) if grammar.produces(&value) => Some(value),
            _ => None,
        }
    }

    fn produces(&self, value: &ParsedValue) -> bool {
        matches!(
            (self, value),
            (Grammar::Double, ParsedValue::Double(_))
                | (Grammar::Int, ParsedValue::Int(_))
                | (Grammar::Bool, ParsedValue::Bool(_))
                | (Grammar::Point, ParsedValue::Point(_))
                | (Grammar::Rect, ParsedValue::Rect(_))
                | (Grammar::SplineType, ParsedValue::SplineType(_))
                | (Grammar::Color, ParsedValue::Color(_))
                | (Grammar::ColorList, ParsedValue::ColorList(_))
                | (Grammar::ArrowType, ParsedValue::ArrowType(_))
                | (Grammar::Style, ParsedValue::Style(_))
                | (Grammar::Shape, ParsedValue::Shape(_))
                | (Grammar::DirType, ParsedValue::DirType(_))
                | (Grammar::ClusterMode, ParsedValue::ClusterMode(_))
                | (Grammar::RankDir, ParsedValue::RankDir(_))
                | (Grammar::PageDir, ParsedValue::PageDir(_))
                | (Grammar::Layout, ParsedValue::Layout(_))
                | (Grammar::OutputMode, ParsedValue::OutputMode(_))
                | (Grammar::RankType, ParsedValue::RankType(_))
                | (Grammar::Splines, ParsedValue::Splines(_))
                | (Grammar::PortPos, ParsedValue::PortPos(_))
                | (Grammar::EscString | Grammar::String, ParsedValue::Text(_))
        )
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

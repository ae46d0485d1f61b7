//! Shared types and errors for the dotattr workspace.
//!
//! This crate provides the foundational types used across the other crates:
//! - `DotAttrError`: unified error taxonomy
//! - `ElementKind`: the kinds of DOT elements an attribute can live on
//! - `Span`: byte offset and length of a token in DOT source

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unified error type for all dotattr subsystems.
#[derive(Debug, thiserror::Error)]
pub enum DotAttrError {
    // === Document Errors ===
    #[error("DOT parse error at line {line}, col {col}: {message}")]
    ParseError {
        line: usize,
        col: usize,
        message: String,
        source_snippet: Option<String>,
    },

    // === Attribute Errors ===
    #[error(
        "Cannot set {kind} attribute '{name}' to '{value}'. The value '{value}' is not a syntactically correct {grammar}: {detail}"
    )]
    SyntaxError {
        kind: ElementKind,
        name: String,
        value: String,
        grammar: String,
        detail: String,
    },

    #[error(
        "Cannot set {kind} attribute '{name}' to '{value}'. The {value_type} value '{value}' is not semantically correct: {detail}"
    )]
    SemanticError {
        kind: ElementKind,
        name: String,
        value: String,
        value_type: String,
        detail: String,
    },

    #[error("Cannot set {kind} attribute '{name}': expected a {expected} value but got a {actual} value.")]
    ValueMismatch {
        kind: ElementKind,
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Document validation failed: {0}")]
    ValidationError(String),

    // === Generic ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl DotAttrError {
    /// Returns `true` if the grammar of an attribute rejected the value.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, DotAttrError::SyntaxError { .. })
    }

    /// Returns `true` if the value parsed but violated a constraint.
    pub fn is_semantic_error(&self) -> bool {
        matches!(self, DotAttrError::SemanticError { .. })
    }

    /// The literal value an attribute error was raised for.
    pub fn offending_value(&self) -> Option<&str> {
        match self {
            DotAttrError::SyntaxError { value, .. } | DotAttrError::SemanticError { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }
}

/// A convenience alias for `Result<T, DotAttrError>`.
pub type Result<T> = std::result::Result<T, DotAttrError>;

// ---------------------------------------------------------------------------
// ElementKind: which kind of DOT element an attribute belongs to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Graph,
    Cluster,
    Subgraph,
    Node,
    Edge,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Graph,
        ElementKind::Cluster,
        ElementKind::Subgraph,
        ElementKind::Node,
        ElementKind::Edge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Graph => "graph",
            ElementKind::Cluster => "cluster",
            ElementKind::Subgraph => "subgraph",
            ElementKind::Node => "node",
            ElementKind::Edge => "edge",
        }
    }

    /// Kind of a subgraph with the given name. Graphviz treats subgraphs
    /// whose name starts with `cluster` as clusters.
    pub fn for_subgraph(name: Option<&str>) -> Self {
        match name {
            Some(n) if n.starts_with("cluster") => ElementKind::Cluster,
            _ => ElementKind::Subgraph,
        }
    }

    /// Graph-like kinds own graph attributes and node/edge defaults.
    pub fn is_graph_like(&self) -> bool {
        matches!(
            self,
            ElementKind::Graph | ElementKind::Cluster | ElementKind::Subgraph
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                format!("unknown element kind '{s}' (expected graph, cluster, subgraph, node or edge)")
            })
    }
}

// ---------------------------------------------------------------------------
// Span: location of a token in DOT source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// 1-based (line, column) of the span start within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let prefix = &source[..self.offset.min(source.len())];
        let line = prefix.matches('\n').count() + 1;
        let col = match prefix.rfind('\n') {
            Some(pos) => prefix[pos + 1..].chars().count() + 1,
            None => prefix.chars().count() + 1,
        };
        (line, col)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end.saturating_sub(range.start))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Display ---

    #[test]
    fn error_display_parse_error() {
        let err = DotAttrError::ParseError {
            line: 10,
            col: 5,
            message: "unexpected token".into(),
            source_snippet: Some("digraph {".into()),
        };
        assert_eq!(
            err.to_string(),
            "DOT parse error at line 10, col 5: unexpected token"
        );
    }

    #[test]
    fn error_display_syntax_error() {
        let err = DotAttrError::SyntaxError {
            kind: ElementKind::Graph,
            name: "nodesep".into(),
            value: "foo".into(),
            grammar: "double".into(),
            detail: "No viable alternative at character 'f'.".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot set graph attribute 'nodesep' to 'foo'. The value 'foo' is not a syntactically correct double: No viable alternative at character 'f'."
        );
    }

    #[test]
    fn error_display_semantic_error() {
        let err = DotAttrError::SemanticError {
            kind: ElementKind::Graph,
            name: "nodesep".into(),
            value: "0.0199".into(),
            value_type: "double".into(),
            detail: "Value may not be smaller than 0.02.".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot set graph attribute 'nodesep' to '0.0199'. The double value '0.0199' is not semantically correct: Value may not be smaller than 0.02."
        );
    }

    #[test]
    fn error_display_value_mismatch() {
        let err = DotAttrError::ValueMismatch {
            kind: ElementKind::Node,
            name: "shape".into(),
            expected: "shape".into(),
            actual: "double".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot set node attribute 'shape': expected a shape value but got a double value."
        );
    }

    #[test]
    fn error_display_validation() {
        let err = DotAttrError::ValidationError("bad color".into());
        assert_eq!(err.to_string(), "Document validation failed: bad color");
    }

    #[test]
    fn error_display_other() {
        let err = DotAttrError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn syntax_and_semantic_predicates() {
        let err = DotAttrError::SyntaxError {
            kind: ElementKind::Edge,
            name: "arrowsize".into(),
            value: "x".into(),
            grammar: "double".into(),
            detail: "d.".into(),
        };
        assert!(err.is_syntax_error());
        assert!(!err.is_semantic_error());
        assert_eq!(err.offending_value(), Some("x"));
        assert_eq!(DotAttrError::Other("o".into()).offending_value(), None);
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DotAttrError = io.into();
        assert!(matches!(err, DotAttrError::Io(_)));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let err: DotAttrError = json_err.into();
        assert!(matches!(err, DotAttrError::Json(_)));
    }

    // --- ElementKind ---

    #[test]
    fn element_kind_display_and_parse() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.to_string().parse::<ElementKind>().unwrap(), kind);
        }
        assert!("vertex".parse::<ElementKind>().is_err());
    }

    #[test]
    fn cluster_detection_by_name() {
        assert_eq!(ElementKind::for_subgraph(Some("cluster_a")), ElementKind::Cluster);
        assert_eq!(ElementKind::for_subgraph(Some("inner")), ElementKind::Subgraph);
        assert_eq!(ElementKind::for_subgraph(None), ElementKind::Subgraph);
    }

    #[test]
    fn element_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ElementKind::Cluster).unwrap();
        assert_eq!(json, "\"cluster\"");
    }

    // --- Span ---

    #[test]
    fn span_line_col() {
        let src = "graph {\n  a [color=red]\n}";
        let offset = src.find("red").unwrap();
        let span = Span::new(offset, 3);
        assert_eq!(span.line_col(src), (2, 12));
        assert_eq!(span.end(), offset + 3);
    }

    #[test]
    fn span_from_range() {
        assert_eq!(Span::from(4..9), Span::new(4, 5));
    }
}

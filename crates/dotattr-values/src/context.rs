//! Cross-attribute context for semantic validation.
//!
//! A [`ResolutionContext`] records what surrounds an attribute: the element's
//! own `colorscheme` and `shape`, those of the `node[...]`/`edge[...]`
//! defaults in scope, and the `colorscheme` of every enclosing graph. Lists
//! are ordered nearest first, so the nearest declaration wins.

use dotattr_dot::AttributeMap;
use dotattr_types::ElementKind;

use crate::colorscheme::DEFAULT_SCHEME;

pub const COLORSCHEME: &str = "colorscheme";
pub const SHAPE: &str = "shape";
pub const DEFAULT_SHAPE: &str = "ellipse";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    pub kind: ElementKind,
    pub element_scheme: Option<String>,
    pub default_schemes: Vec<String>,
    pub graph_schemes: Vec<String>,
    pub own_shape: Option<String>,
    pub default_shapes: Vec<String>,
}

impl ResolutionContext {
    /// An empty context for an element of `kind`.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            element_scheme: None,
            default_schemes: Vec::new(),
            graph_schemes: Vec::new(),
            own_shape: None,
            default_shapes: Vec::new(),
        }
    }

    /// Context from an element's own attributes only.
    pub fn for_element(kind: ElementKind, attrs: &AttributeMap) -> Self {
        let mut ctx = Self::new(kind);
        ctx.element_scheme = attrs.text(COLORSCHEME).map(str::to_string);
        if kind == ElementKind::Node {
            ctx.own_shape = attrs.text(SHAPE).map(str::to_string);
        }
        ctx
    }

    /// Add a `node[...]`/`edge[...]` default block, outer blocks after inner ones.
    pub fn with_defaults(mut self, defaults: &AttributeMap) -> Self {
        if let Some(scheme) = defaults.text(COLORSCHEME) {
            self.default_schemes.push(scheme.to_string());
        }
        if self.kind == ElementKind::Node {
            if let Some(shape) = defaults.text(SHAPE) {
                self.default_shapes.push(shape.to_string());
            }
        }
        self
    }

    /// Add an enclosing graph or subgraph, outer graphs after inner ones.
    pub fn with_graph(mut self, graph_attrs: &AttributeMap) -> Self {
        if let Some(scheme) = graph_attrs.text(COLORSCHEME) {
            self.graph_schemes.push(scheme.to_string());
        }
        self
    }

    /// own → defaults → enclosing graphs → `x11`
    pub fn effective_colorscheme(&self) -> &str {
        self.element_scheme
            .iter()
            .chain(&self.default_schemes)
            .chain(&self.graph_schemes)
            .next()
            .map_or(DEFAULT_SCHEME, String::as_str)
    }

    /// own → defaults → `ellipse`
    pub fn effective_shape(&self) -> &str {
        self.own_shape
            .iter()
            .chain(&self.default_shapes)
            .next()
            .map_or(DEFAULT_SHAPE, String::as_str)
    }
}

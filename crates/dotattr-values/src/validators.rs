//! Semantic validators.
//!
//! Validators run on a successfully parsed value and report [`Finding`]s.
//! An `Error` finding rejects the value; a `Warning` is reported next to an
//! accepted one.

use dotattr_types::ElementKind;

use crate::colorscheme::{scheme, scheme_names};
use crate::context::ResolutionContext;
use crate::serialize::format_double;
use crate::validation::Severity;
use crate::value::{ArrowShape, Color, ColorList, HsvColor, NamedColor, ParsedValue, Primitive, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// Ends with a period.
    pub detail: String,
}

impl Finding {
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            detail: detail.into(),
        }
    }

    pub fn warning(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            detail: detail.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A numeric bound, printed the way its attribute's grammar prints numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    Double(f64),
    Int(i64),
}

impl Limit {
    fn value(&self) -> f64 {
        match self {
            Limit::Double(d) => *d,
            Limit::Int(i) => *i as f64,
        }
    }

    fn render(&self) -> String {
        match self {
            Limit::Double(d) => format_double(*d),
            Limit::Int(i) => i.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validator {
    AtLeast(Limit),
    Between(Limit, Limit),
    /// `colorscheme` names a known scheme.
    ColorScheme,
    /// Color legality in the resolved scheme, HSV ranges, list weights.
    Color,
    /// Style items allowed for the element kind, and style/shape coupling.
    Style,
    /// Arrow shape modifiers and deprecated shapes.
    Arrow,
}

impl Validator {
    pub fn check(&self, value: &ParsedValue, ctx: &ResolutionContext) -> Vec<Finding> {
        match self {
            Validator::AtLeast(min) => check_range(value, Some(*min), None),
            Validator::Between(min, max) => check_range(value, Some(*min), Some(*max)),
            Validator::ColorScheme => check_colorscheme(value),
            Validator::Color => check_colors(value, ctx),
            Validator::Style => match value {
                ParsedValue::Style(style) => check_style(style, ctx),
                _ => Vec::new(),
            },
            Validator::Arrow => match value {
                ParsedValue::ArrowType(arrow) => check_arrow(&arrow.shapes),
                _ => Vec::new(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric ranges
// ---------------------------------------------------------------------------

fn check_range(value: &ParsedValue, min: Option<Limit>, max: Option<Limit>) -> Vec<Finding> {
    let Some(v) = value.as_f64() else {
        return Vec::new();
    };
    if let Some(min) = min.filter(|m| v < m.value()) {
        return vec![Finding::error(format!(
            "Value may not be smaller than {}.",
            min.render()
        ))];
    }
    if let Some(max) = max.filter(|m| v > m.value()) {
        return vec![Finding::error(format!(
            "Value may not be larger than {}.",
            max.render()
        ))];
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

fn quoted_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|i| format!("'{i}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_colorscheme(value: &ParsedValue) -> Vec<Finding> {
    match value {
        ParsedValue::Text(name) if scheme(name).is_none() => vec![Finding::error(format!(
            "Value should be one of {}.",
            quoted_list(scheme_names())
        ))],
        _ => Vec::new(),
    }
}

fn check_colors(value: &ParsedValue, ctx: &ResolutionContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for color in value.colors() {
        match color {
            Color::Rgb(_) => {}
            Color::Hsv(hsv) => findings.extend(check_hsv(hsv)),
            Color::Named(named) => findings.extend(check_named(named, ctx)),
        }
    }
    if let ParsedValue::ColorList(list) = value {
        findings.extend(check_weights(list));
    }
    findings
}

fn check_hsv(hsv: &HsvColor) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (component, v) in [("hue", hsv.h), ("saturation", hsv.s), ("value", hsv.v)] {
        if v < 0.0 {
            findings.push(Finding::error(format!(
                "The {component} component of an HSV color may not be smaller than 0.0."
            )));
        } else if v > 1.0 {
            findings.push(Finding::error(format!(
                "The {component} component of an HSV color may not be larger than 1.0."
            )));
        }
    }
    findings
}

/// An explicit `/scheme/name` is checked against that scheme; otherwise the
/// resolved scheme applies. An unknown resolved scheme is left to the
/// `colorscheme` attribute's own check.
fn check_named(color: &NamedColor, ctx: &ResolutionContext) -> Option<Finding> {
    let (scheme_name, explicit) = match &color.scheme {
        Some(s) => (s.as_str(), true),
        None => (ctx.effective_colorscheme(), false),
    };
    match scheme(scheme_name) {
        None if explicit => Some(Finding::error(format!(
            "The color scheme '{scheme_name}' is not defined."
        ))),
        None => None,
        Some(s) if !s.contains(&color.name) => Some(Finding::error(format!(
            "The '{}' color is not valid within the '{scheme_name}' color scheme.",
            color.name
        ))),
        Some(_) => None,
    }
}

fn check_weights(list: &ColorList) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut sum = 0.0;
    for w in list.entries.iter().filter_map(|e| e.weight) {
        if w < 0.0 {
            findings.push(Finding::error(format!(
                "The weight '{}' of a color list entry may not be smaller than 0.0.",
                format_double(w)
            )));
        } else if w > 1.0 {
            findings.push(Finding::error(format!(
                "The weight '{}' of a color list entry may not be larger than 1.0.",
                format_double(w)
            )));
        }
        sum += w;
    }
    if findings.is_empty() && sum > 1.0 {
        findings.push(Finding::error(
            "The weights of a color list may not sum up to more than 1.0.",
        ));
    }
    findings
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

const EDGE_STYLES: &[&str] = &["bold", "dashed", "dotted", "invis", "solid", "tapered"];
const NODE_STYLES: &[&str] = &[
    "bold", "dashed", "diagonals", "dotted", "filled", "invis", "radial", "rounded", "solid",
    "striped", "tapered", "wedged",
];
const CLUSTER_STYLES: &[&str] = &[
    "bold", "dashed", "dotted", "filled", "invis", "radial", "rounded", "solid", "striped",
];
const GRAPH_STYLES: &[&str] = &["filled", "radial"];

const RECTANGULAR_SHAPES: &[&str] = &["box", "rect", "rectangle", "square"];
const ELLIPTIC_SHAPES: &[&str] = &["ellipse", "oval"];

/// Style items an element kind accepts, in declaration order.
pub fn allowed_styles(kind: ElementKind) -> &'static [&'static str] {
    match kind {
        ElementKind::Edge => EDGE_STYLES,
        ElementKind::Node => NODE_STYLES,
        ElementKind::Cluster => CLUSTER_STYLES,
        ElementKind::Graph | ElementKind::Subgraph => GRAPH_STYLES,
    }
}

fn check_style(style: &Style, ctx: &ResolutionContext) -> Vec<Finding> {
    let allowed = allowed_styles(ctx.kind);
    let mut findings = Vec::new();
    for item in &style.items {
        let name = item.name.as_str();
        if name == "setlinewidth" {
            findings.push(Finding::warning(
                "The usage of setlinewidth is deprecated, use the 'penwidth' attribute instead.",
            ));
            continue;
        }
        if !allowed.contains(&name) {
            findings.push(Finding::error(format!(
                "Value should be one of {}.",
                quoted_list(allowed.iter().copied())
            )));
            continue;
        }
        if ctx.kind != ElementKind::Node {
            continue;
        }
        let shape = ctx.effective_shape();
        if name == "striped" && !RECTANGULAR_SHAPES.contains(&shape) {
            findings.push(Finding::error(
                "The style 'striped' is only supported with clusters and rectangularly-shaped nodes, such as 'box', 'rect', 'rectangle', 'square'.",
            ));
        }
        if name == "wedged" && !ELLIPTIC_SHAPES.contains(&shape) {
            findings.push(Finding::error(
                "The style 'wedged' is only supported with elliptically-shaped nodes, such as 'ellipse', 'oval'.",
            ));
        }
    }
    findings
}

// ---------------------------------------------------------------------------
// Arrow types
// ---------------------------------------------------------------------------

fn check_arrow(shapes: &[ArrowShape]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for shape in shapes {
        match shape {
            ArrowShape::Modern {
                open,
                side,
                primitive,
            } => {
                if *open && !primitive.accepts_open() {
                    findings.push(Finding::error(format!(
                        "The open modifier 'o' may not be combined with primitive shape '{}'.",
                        primitive.as_str()
                    )));
                }
                if let Some(side) = side.filter(|_| !primitive.accepts_side()) {
                    findings.push(Finding::error(format!(
                        "The side modifier '{}' may not be combined with primitive shape '{}'.",
                        side.as_char(),
                        primitive.as_str()
                    )));
                }
            }
            ArrowShape::Deprecated(d) => {
                findings.push(Finding::warning(format!(
                    "The shape '{}' is deprecated.",
                    d.as_str()
                )));
            }
        }
    }
    let ends_with_none = matches!(
        shapes.last(),
        Some(ArrowShape::Modern {
            primitive: Primitive::None,
            ..
        })
    );
    if shapes.len() > 1 && ends_with_none {
        findings.push(Finding::error("The shape 'none' may not be the last shape."));
    }
    findings
}

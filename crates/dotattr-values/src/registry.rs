//! Attribute registry.
//!
//! One [`AttributeDescriptor`] per attribute name, listing the element kinds
//! it applies to, the grammar of its value and the validators run after a
//! successful parse. Lookups go through a `(kind, name)` index built on
//! first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use dotattr_types::ElementKind;

use crate::context::ResolutionContext;
use crate::grammar::{Grammar, SyntaxError};
use crate::validators::{Finding, Limit, Validator};
use crate::value::ParsedValue;

#[derive(Debug)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub kinds: &'static [ElementKind],
    pub grammar: Grammar,
    pub validators: &'static [Validator],
    pub description: &'static str,
}

impl AttributeDescriptor {
    pub fn applies_to(&self, kind: ElementKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Decode a raw value under this attribute's grammar.
    pub fn parse(&self, raw: &str) -> Result<ParsedValue, SyntaxError> {
        self.grammar.parse(raw)
    }

    /// Run every validator on a decoded value.
    pub fn validate(&self, value: &ParsedValue, ctx: &ResolutionContext) -> Vec<Finding> {
        self.validators
            .iter()
            .flat_map(|v| v.check(value, ctx))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

use ElementKind::{Cluster as C, Edge as E, Graph as G, Node as N, Subgraph as S};

const fn attr(
    name: &'static str,
    kinds: &'static [ElementKind],
    grammar: Grammar,
    validators: &'static [Validator],
    description: &'static str,
) -> AttributeDescriptor {
    AttributeDescriptor {
        name,
        kinds,
        grammar,
        validators,
        description,
    }
}

use Limit::{Double, Int};
use Validator::{AtLeast, Between};

static ATTRIBUTES: &[AttributeDescriptor] = &[
    attr("arrowhead", &[E], Grammar::ArrowType, &[Validator::Arrow], "Arrowhead shape at the head node"),
    attr("arrowsize", &[E], Grammar::Double, &[AtLeast(Double(0.0))], "Multiplicative scale factor for arrowheads"),
    attr("arrowtail", &[E], Grammar::ArrowType, &[Validator::Arrow], "Arrowhead shape at the tail node"),
    attr("bb", &[G, C], Grammar::Rect, &[], "Bounding box of the drawing"),
    attr("bgcolor", &[G, C], Grammar::ColorList, &[Validator::Color], "Canvas background color"),
    attr("center", &[G], Grammar::Bool, &[], "Center the drawing in the output canvas"),
    attr("clusterrank", &[G], Grammar::ClusterMode, &[], "Mode used for handling clusters"),
    attr("color", &[N, E, C], Grammar::ColorList, &[Validator::Color], "Basic drawing color"),
    attr("colorscheme", &[G, C, S, N, E], Grammar::String, &[Validator::ColorScheme], "Scheme used to interpret color names"),
    attr("compound", &[G], Grammar::Bool, &[], "Allow edges between clusters"),
    attr("concentrate", &[G], Grammar::Bool, &[], "Merge multiedges into a single edge"),
    attr("constraint", &[E], Grammar::Bool, &[], "Whether the edge is used in node ranking"),
    attr("decorate", &[E], Grammar::Bool, &[], "Connect the edge label to the edge with a line"),
    attr("dir", &[E], Grammar::DirType, &[], "Edge type for drawing arrowheads"),
    attr("distortion", &[N], Grammar::Double, &[Between(Double(-100.0), Double(100.0))], "Distortion factor for polygon shapes"),
    attr("fillcolor", &[N, C], Grammar::ColorList, &[Validator::Color], "Color used to fill the background"),
    attr("fixedsize", &[N], Grammar::Bool, &[], "Use width and height as the exact node size"),
    attr("fontcolor", &[G, C, N, E], Grammar::Color, &[Validator::Color], "Color used for text"),
    attr("fontname", &[G, C, N, E], Grammar::String, &[], "Font used for text"),
    attr("fontsize", &[G, C, N, E], Grammar::Double, &[AtLeast(Double(1.0))], "Font size, in points"),
    attr("forcelabels", &[G], Grammar::Bool, &[], "Place all xlabels, even if overlapping"),
    attr("head_lp", &[E], Grammar::Point, &[], "Position of the head label"),
    attr("headclip", &[E], Grammar::Bool, &[], "Clip the head of the edge to the node boundary"),
    attr("headlabel", &[E], Grammar::EscString, &[], "Text label near the head of the edge"),
    attr("headport", &[E], Grammar::PortPos, &[], "Where on the head node to attach the edge"),
    attr("headtooltip", &[E], Grammar::EscString, &[], "Tooltip annotation attached to the edge head"),
    attr("height", &[N], Grammar::Double, &[AtLeast(Double(0.02))], "Height of the node, in inches"),
    attr("id", &[G, C, N, E], Grammar::EscString, &[], "Identifier for output objects"),
    attr("label", &[G, C, N, E], Grammar::EscString, &[], "Text label attached to objects"),
    attr("labelangle", &[E], Grammar::Double, &[AtLeast(Double(-180.0))], "Angle of the head and tail labels"),
    attr("labeldistance", &[E], Grammar::Double, &[AtLeast(Double(0.0))], "Scale factor for head and tail label distance"),
    attr("labelfontcolor", &[E], Grammar::Color, &[Validator::Color], "Color used for head and tail labels"),
    attr("labelfontname", &[E], Grammar::String, &[], "Font used for head and tail labels"),
    attr("labelfontsize", &[E], Grammar::Double, &[AtLeast(Double(1.0))], "Font size of head and tail labels"),
    attr("layout", &[G], Grammar::Layout, &[], "Which layout engine to use"),
    attr("lp", &[G, C, E], Grammar::Point, &[], "Label center position"),
    attr("minlen", &[E], Grammar::Int, &[AtLeast(Int(0))], "Minimum edge length in ranks"),
    attr("newrank", &[G], Grammar::Bool, &[], "Use a single global ranking"),
    attr("nodesep", &[G], Grammar::Double, &[AtLeast(Double(0.02))], "Minimum space between adjacent nodes"),
    attr("orientation", &[N], Grammar::Double, &[Between(Double(0.0), Double(360.0))], "Node shape rotation angle"),
    attr("outputorder", &[G], Grammar::OutputMode, &[], "Order in which nodes and edges are drawn"),
    attr("pagedir", &[G], Grammar::PageDir, &[], "Order in which pages are emitted"),
    attr("pencolor", &[C], Grammar::Color, &[Validator::Color], "Color used to draw the cluster bounding box"),
    attr("penwidth", &[C, N, E], Grammar::Double, &[AtLeast(Double(0.0))], "Width of the pen, in points"),
    attr("peripheries", &[N, C], Grammar::Int, &[AtLeast(Int(0))], "Number of peripheries"),
    attr("pos", &[N], Grammar::Point, &[], "Position of the node"),
    attr("pos", &[E], Grammar::SplineType, &[], "Spline control points of the edge"),
    attr("rank", &[S, C], Grammar::RankType, &[], "Rank constraints on the subgraph's nodes"),
    attr("rankdir", &[G], Grammar::RankDir, &[], "Direction of the layout"),
    attr("ranksep", &[G], Grammar::Double, &[AtLeast(Double(0.02))], "Separation between ranks"),
    attr("regular", &[N], Grammar::Bool, &[], "Force a regular polygon"),
    attr("shape", &[N], Grammar::Shape, &[], "Shape of the node"),
    attr("sides", &[N], Grammar::Int, &[AtLeast(Int(0))], "Number of sides of a polygon shape"),
    attr("skew", &[N], Grammar::Double, &[Between(Double(-100.0), Double(100.0))], "Skew factor for polygon shapes"),
    attr("splines", &[G], Grammar::Splines, &[], "How edges are represented"),
    attr("style", &[G, C, S, N, E], Grammar::Style, &[Validator::Style], "Style information for components"),
    attr("tail_lp", &[E], Grammar::Point, &[], "Position of the tail label"),
    attr("tailclip", &[E], Grammar::Bool, &[], "Clip the tail of the edge to the node boundary"),
    attr("taillabel", &[E], Grammar::EscString, &[], "Text label near the tail of the edge"),
    attr("tailport", &[E], Grammar::PortPos, &[], "Where on the tail node to attach the edge"),
    attr("tailtooltip", &[E], Grammar::EscString, &[], "Tooltip annotation attached to the edge tail"),
    attr("tooltip", &[C, N, E], Grammar::EscString, &[], "Tooltip annotation"),
    attr("weight", &[E], Grammar::Int, &[AtLeast(Int(0))], "Weight of the edge"),
    attr("xlabel", &[N, E], Grammar::EscString, &[], "External label"),
    attr("xlp", &[N, E], Grammar::Point, &[], "Position of the external label"),
];

static INDEX: LazyLock<HashMap<(ElementKind, &'static str), &'static AttributeDescriptor>> =
    LazyLock::new(|| {
        let mut index = HashMap::new();
        for descriptor in ATTRIBUTES {
            for &kind in descriptor.kinds {
                index.insert((kind, descriptor.name), descriptor);
            }
        }
        tracing::debug!(
            attributes = ATTRIBUTES.len(),
            entries = index.len(),
            "Built attribute registry"
        );
        index
    });

/// Descriptor for `name` on an element of `kind`, if registered.
pub fn descriptor(kind: ElementKind, name: &str) -> Option<&'static AttributeDescriptor> {
    INDEX.get(&(kind, name)).copied()
}

/// Every descriptor, sorted by name.
pub fn descriptors() -> &'static [AttributeDescriptor] {
    ATTRIBUTES
}

/// Descriptors applying to `kind`, sorted by name.
pub fn descriptors_for(kind: ElementKind) -> impl Iterator<Item = &'static AttributeDescriptor> {
    ATTRIBUTES.iter().filter(move |d| d.applies_to(kind))
}

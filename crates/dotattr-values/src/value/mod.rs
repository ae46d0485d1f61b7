//! Typed attribute values.
//!
//! [`ParsedValue`] is the closed set of decodings a grammar can produce. Its
//! canonical text form lives in [`crate::serialize`].

mod arrow;
mod color;
mod enums;
mod geometry;
mod style;

pub use arrow::{ArrowShape, ArrowType, DeprecatedShape, Primitive, Side};
pub use color::{Color, ColorList, HsvColor, NamedColor, RgbColor, WeightedColor};
pub use enums::{
    ClusterMode, CompassPoint, DirType, Layout, OutputMode, PageDir, PolygonShape, PortPos,
    RankDir, RankType, RecordShape, Shape, Splines,
};
pub use geometry::{Point, Rect, Spline, SplineType};
pub use style::{Style, StyleItem};

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Double(f64),
    Int(i64),
    Bool(bool),
    Point(Point),
    Rect(Rect),
    SplineType(SplineType),
    Color(Color),
    ColorList(ColorList),
    ArrowType(ArrowType),
    Style(Style),
    Shape(Shape),
    DirType(DirType),
    ClusterMode(ClusterMode),
    RankDir(RankDir),
    PageDir(PageDir),
    Layout(Layout),
    OutputMode(OutputMode),
    RankType(RankType),
    Splines(Splines),
    PortPos(PortPos),
    Text(String),
}

impl ParsedValue {
    /// Short name of the variant, used when a typed value does not fit an attribute.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParsedValue::Double(_) => "double",
            ParsedValue::Int(_) => "int",
            ParsedValue::Bool(_) => "bool",
            ParsedValue::Point(_) => "point",
            ParsedValue::Rect(_) => "rect",
            ParsedValue::SplineType(_) => "splineType",
            ParsedValue::Color(_) => "color",
            ParsedValue::ColorList(_) => "colorList",
            ParsedValue::ArrowType(_) => "arrowType",
            ParsedValue::Style(_) => "style",
            ParsedValue::Shape(_) => "shape",
            ParsedValue::DirType(_) => "dirType",
            ParsedValue::ClusterMode(_) => "clusterMode",
            ParsedValue::RankDir(_) => "rankdir",
            ParsedValue::PageDir(_) => "pagedir",
            ParsedValue::Layout(_) => "layout",
            ParsedValue::OutputMode(_) => "outputMode",
            ParsedValue::RankType(_) => "rankType",
            ParsedValue::Splines(_) => "splines",
            ParsedValue::PortPos(_) => "portPos",
            ParsedValue::Text(_) => "string",
        }
    }

    /// Every color the value carries, in order.
    pub fn colors(&self) -> Vec<&Color> {
        match self {
            ParsedValue::Color(c) => vec![c],
            ParsedValue::ColorList(list) => list.colors().collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParsedValue::Double(d) => Some(*d),
            ParsedValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<Color> for ParsedValue {
    fn from(color: Color) -> Self {
        ParsedValue::Color(color)
    }
}

impl From<RgbColor> for ParsedValue {
    fn from(color: RgbColor) -> Self {
        ParsedValue::Color(Color::Rgb(color))
    }
}

impl From<f64> for ParsedValue {
    fn from(d: f64) -> Self {
        ParsedValue::Double(d)
    }
}

impl From<Style> for ParsedValue {
    fn from(style: Style) -> Self {
        ParsedValue::Style(style)
    }
}

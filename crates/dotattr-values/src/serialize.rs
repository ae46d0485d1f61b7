//! Canonical DOT text for typed values.
//!
//! Every value type implements `Display` with its canonical form, and
//! [`serialize`] dispatches over [`ParsedValue`]. Reparsing the output yields
//! the same value.

use std::fmt::{self, Display, Formatter, Write as _};

use crate::value::*;

/// Canonical text of a typed value.
pub fn serialize(value: &ParsedValue) -> String {
    value.to_string()
}

/// Shortest round-trip decimal, always with a fractional part (`0.02`, `33.0`).
pub(crate) fn format_double(d: f64) -> String {
    format!("{d:?}")
}

impl Display for ParsedValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParsedValue::Double(d) => f.write_str(&format_double(*d)),
            ParsedValue::Int(i) => write!(f, "{i}"),
            ParsedValue::Bool(b) => write!(f, "{b}"),
            ParsedValue::Point(p) => p.fmt(f),
            ParsedValue::Rect(r) => r.fmt(f),
            ParsedValue::SplineType(s) => s.fmt(f),
            ParsedValue::Color(c) => c.fmt(f),
            ParsedValue::ColorList(l) => l.fmt(f),
            ParsedValue::ArrowType(a) => a.fmt(f),
            ParsedValue::Style(s) => s.fmt(f),
            ParsedValue::Shape(s) => f.write_str(s.as_str()),
            ParsedValue::DirType(v) => f.write_str(v.as_str()),
            ParsedValue::ClusterMode(v) => f.write_str(v.as_str()),
            ParsedValue::RankDir(v) => f.write_str(v.as_str()),
            ParsedValue::PageDir(v) => f.write_str(v.as_str()),
            ParsedValue::Layout(v) => f.write_str(v.as_str()),
            ParsedValue::OutputMode(v) => f.write_str(v.as_str()),
            ParsedValue::RankType(v) => f.write_str(v.as_str()),
            ParsedValue::Splines(v) => f.write_str(v.as_str()),
            ParsedValue::PortPos(p) => p.fmt(f),
            ParsedValue::Text(t) => f.write_str(t),
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

impl Point {
    fn write_coords(&self, f: &mut Formatter<'_>, separator: &str) -> fmt::Result {
        write!(
            f,
            "{}{separator}{}",
            format_double(self.x),
            format_double(self.y)
        )?;
        if self.pinned {
            f.write_char('!')?;
        }
        Ok(())
    }
}

/// A stand-alone point: `x, y` with an optional `!`.
impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_coords(f, ", ")
    }
}

/// Spline control point: `x,y` so that points stay whitespace separated.
struct ControlPoint<'a>(&'a Point);

impl Display for ControlPoint<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.write_coords(f, ",")
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} , {} , {} , {}",
            format_double(self.llx),
            format_double(self.lly),
            format_double(self.urx),
            format_double(self.ury)
        )
    }
}

impl Display for Spline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "s,{} ", ControlPoint(start))?;
        }
        if let Some(end) = &self.end {
            write!(f, "e,{} ", ControlPoint(end))?;
        }
        let points: Vec<String> = self
            .points
            .iter()
            .map(|p| ControlPoint(p).to_string())
            .collect();
        f.write_str(&points.join(" "))
    }
}

impl Display for SplineType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let splines: Vec<String> = self.splines.iter().map(Spline::to_string).collect();
        f.write_str(&splines.join(";"))
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

impl Display for RgbColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if let Some(a) = self.a {
            write!(f, "{a:02x}")?;
        }
        Ok(())
    }
}

impl Display for HsvColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_double(self.h),
            format_double(self.s),
            format_double(self.v)
        )
    }
}

impl Display for NamedColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "/{scheme}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(c) => c.fmt(f),
            Color::Hsv(c) => c.fmt(f),
            Color::Named(c) => c.fmt(f),
        }
    }
}

impl Display for WeightedColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.color.fmt(f)?;
        if let Some(w) = self.weight {
            write!(f, ";{}", format_double(w))?;
        }
        Ok(())
    }
}

impl Display for ColorList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self.entries.iter().map(WeightedColor::to_string).collect();
        f.write_str(&entries.join(":"))
    }
}

// ---------------------------------------------------------------------------
// Arrows, styles, ports
// ---------------------------------------------------------------------------

impl Display for ArrowShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArrowShape::Modern {
                open,
                side,
                primitive,
            } => {
                if *open {
                    f.write_char('o')?;
                }
                if let Some(side) = side {
                    f.write_char(side.as_char())?;
                }
                f.write_str(primitive.as_str())
            }
            ArrowShape::Deprecated(d) => f.write_str(d.as_str()),
        }
    }
}

impl Display for ArrowType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for shape in &self.shapes {
            shape.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for StyleItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            write!(f, "({})", self.args.join(","))?;
        }
        Ok(())
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.items.iter().map(StyleItem::to_string).collect();
        f.write_str(&items.join(" , "))
    }
}

impl Display for PortPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.port, &self.compass) {
            (Some(port), Some(compass)) => write!(f, "{port}:{}", compass.as_str()),
            (Some(port), None) => f.write_str(port),
            (None, Some(compass)) => f.write_str(compass.as_str()),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    #[test]
    fn canonical_forms() {
        assert_eq!(serialize(&ParsedValue::Double(0.02)), "0.02");
        assert_eq!(serialize(&ParsedValue::Double(33.0)), "33.0");
        assert_eq!(serialize(&ParsedValue::Bool(true)), "true");
        assert_eq!(
            serialize(&ParsedValue::Point(Point::pinned(33.0, 54.6))),
            "33.0, 54.6!"
        );
        assert_eq!(
            serialize(&ParsedValue::Point(Point::new(-1.0, 0.5))),
            "-1.0, 0.5"
        );
        assert_eq!(
            serialize(&ParsedValue::Rect(Rect {
                llx: 10.1,
                lly: 20.2,
                urx: 30.3,
                ury: 40.4
            })),
            "10.1 , 20.2 , 30.3 , 40.4"
        );
        assert_eq!(
            serialize(&RgbColor::new(0xab, 0xcd, 0xef).into()),
            "#abcdef"
        );
        assert_eq!(
            serialize(&RgbColor::new(255, 0, 0).with_alpha(0xbb).into()),
            "#ff0000bb"
        );
        assert_eq!(
            serialize(&Color::Named(NamedColor::in_scheme("svg", "white")).into()),
            "/svg/white"
        );
    }

    #[test]
    fn spline_and_style_forms() {
        let st = Grammar::SplineType
            .parse("e,20,21 s,10,11 0,0 1,1")
            .unwrap();
        assert_eq!(
            serialize(&st),
            "s,10.0,11.0 e,20.0,21.0 0.0,0.0 1.0,1.0"
        );
        let style = Grammar::Style.parse("bold,dashed").unwrap();
        assert_eq!(serialize(&style), "bold , dashed");
        let style = Grammar::Style.parse("setlinewidth( 2 )").unwrap();
        assert_eq!(serialize(&style), "setlinewidth(2)");
    }

    #[test]
    fn single_entry_color_list_has_no_weight_suffix() {
        let list = Grammar::ColorList.parse("red").unwrap();
        assert_eq!(serialize(&list), "red");
        let list = Grammar::ColorList.parse("red;0.25 : #0000ff").unwrap();
        assert_eq!(serialize(&list), "red;0.25:#0000ff");
    }

    #[test]
    fn reparsing_canonical_text_is_stable() {
        let cases = [
            (Grammar::Double, "1e2"),
            (Grammar::Int, "+7"),
            (Grammar::Bool, "yes"),
            (Grammar::Point, "1, 2 !"),
            (Grammar::Rect, "1,2,3,4"),
            (Grammar::SplineType, "0,0 1,1;2,2 3,3"),
            (Grammar::Color, "0.5,0.25 1"),
            (Grammar::Color, "#ABCDEF"),
            (Grammar::ColorList, "/accent3/1;0.5:2"),
            (Grammar::ArrowType, "olboxrdiamondempty"),
            (Grammar::Style, "filled,rounded"),
            (Grammar::Shape, "Mrecord"),
            (Grammar::Splines, "yes"),
            (Grammar::PortPos, "p:se"),
            (Grammar::RankDir, "LR"),
            (Grammar::DirType, "both"),
            (Grammar::ClusterMode, "global"),
            (Grammar::PageDir, "RT"),
            (Grammar::Layout, "neato"),
            (Grammar::OutputMode, "edgesfirst"),
            (Grammar::RankType, "sink"),
            (Grammar::EscString, "\\N (\\G)"),
            (Grammar::String, "Helvetica Bold"),
            (Grammar::Double, "1e308"),
            (Grammar::Double, "-2.5e-300"),
            (Grammar::Double, "1e-400"),
            (Grammar::Point, "1e300,-1e-300!"),
            (Grammar::ColorList, "red;1e-5:blue"),
        ];
        for (grammar, text) in cases {
            let value = grammar.parse(text).unwrap();
            let again = grammar.parse(&serialize(&value)).unwrap();
            assert_eq!(value, again, "{grammar} value '{text}'");
        }
    }

    #[test]
    fn infinite_values_never_reach_the_serializer() {
        for (grammar, text) in [
            (Grammar::Double, "1e400"),
            (Grammar::Point, "1e400,0"),
            (Grammar::Rect, "0,0,1,1e999"),
            (Grammar::SplineType, "0,0 -1e400,1"),
            (Grammar::Color, "1e400 0 0"),
            (Grammar::ColorList, "red;1e400"),
        ] {
            assert!(grammar.parse(text).is_err(), "{grammar} value '{text}'");
        }
    }
}

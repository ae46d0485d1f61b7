//! Closed keyword sets: enumerations, node shapes and port positions.

/// Declares a keyword enumeration with its DOT spelling.
macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $kw:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $kw),+
                }
            }

            /// Exact, case-sensitive keyword lookup.
            pub fn from_keyword(s: &str) -> Option<Self> {
                match s {
                    $($kw => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn keywords() -> impl Iterator<Item = &'static str> {
                Self::ALL.iter().map(|v| v.as_str())
            }
        }
    };
}

keyword_enum!(
    /// `dir`: which ends of an edge get arrowheads.
    DirType {
        Forward => "forward",
        Back => "back",
        Both => "both",
        None => "none",
    }
);

keyword_enum!(
    /// `clusterrank`
    ClusterMode {
        Local => "local",
        Global => "global",
        None => "none",
    }
);

keyword_enum!(
    RankDir {
        Tb => "TB",
        Lr => "LR",
        Bt => "BT",
        Rl => "RL",
    }
);

keyword_enum!(
    PageDir {
        Bl => "BL",
        Br => "BR",
        Tl => "TL",
        Tr => "TR",
        Rb => "RB",
        Rt => "RT",
        Lb => "LB",
        Lt => "LT",
    }
);

keyword_enum!(
    /// Layout engines.
    Layout {
        Circo => "circo",
        Dot => "dot",
        Fdp => "fdp",
        Neato => "neato",
        Osage => "osage",
        Patchwork => "patchwork",
        Sfdp => "sfdp",
        Twopi => "twopi",
    }
);

keyword_enum!(
    /// `outputorder`
    OutputMode {
        Breadthfirst => "breadthfirst",
        Nodesfirst => "nodesfirst",
        Edgesfirst => "edgesfirst",
    }
);

keyword_enum!(
    RankType {
        Same => "same",
        Min => "min",
        Source => "source",
        Max => "max",
        Sink => "sink",
    }
);

keyword_enum!(
    /// `splines`. The empty string is a value of its own; `yes`/`no` are read
    /// as `true`/`false`.
    Splines {
        Empty => "",
        True => "true",
        False => "false",
        Compound => "compound",
        Curved => "curved",
        Line => "line",
        None => "none",
        Ortho => "ortho",
        Polyline => "polyline",
        Spline => "spline",
    }
);

keyword_enum!(
    CompassPoint {
        N => "n",
        Ne => "ne",
        E => "e",
        Se => "se",
        S => "s",
        Sw => "sw",
        W => "w",
        Nw => "nw",
        C => "c",
        Center => "_",
    }
);

keyword_enum!(
    PolygonShape {
        Box => "box",
        Polygon => "polygon",
        Ellipse => "ellipse",
        Oval => "oval",
        Circle => "circle",
        Point => "point",
        Egg => "egg",
        Triangle => "triangle",
        Plaintext => "plaintext",
        Plain => "plain",
        Diamond => "diamond",
        Trapezium => "trapezium",
        Parallelogram => "parallelogram",
        House => "house",
        Pentagon => "pentagon",
        Hexagon => "hexagon",
        Septagon => "septagon",
        Octagon => "octagon",
        Doublecircle => "doublecircle",
        Doubleoctagon => "doubleoctagon",
        Tripleoctagon => "tripleoctagon",
        Invtriangle => "invtriangle",
        Invtrapezium => "invtrapezium",
        Invhouse => "invhouse",
        Mdiamond => "Mdiamond",
        Msquare => "Msquare",
        Mcircle => "Mcircle",
        Rect => "rect",
        Rectangle => "rectangle",
        Square => "square",
        Star => "star",
        None => "none",
        Underline => "underline",
        Cylinder => "cylinder",
        Note => "note",
        Tab => "tab",
        Folder => "folder",
        Box3d => "box3d",
        Component => "component",
        Promoter => "promoter",
        Cds => "cds",
        Terminator => "terminator",
        Utr => "utr",
        Primersite => "primersite",
        Restrictionsite => "restrictionsite",
        Fivepoverhang => "fivepoverhang",
        Threepoverhang => "threepoverhang",
        Noverhang => "noverhang",
        Assembly => "assembly",
        Signature => "signature",
        Insulator => "insulator",
        Ribosite => "ribosite",
        Rnastab => "rnastab",
        Proteasesite => "proteasesite",
        Proteinstab => "proteinstab",
        Rpromoter => "rpromoter",
        Rarrow => "rarrow",
        Larrow => "larrow",
        Lpromoter => "lpromoter",
    }
);

keyword_enum!(
    RecordShape {
        Record => "record",
        Mrecord => "Mrecord",
    }
);

/// A node shape: polygon-based or record-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Polygon(PolygonShape),
    Record(RecordShape),
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Polygon(p) => p.as_str(),
            Shape::Record(r) => r.as_str(),
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        PolygonShape::from_keyword(s)
            .map(Shape::Polygon)
            .or_else(|| RecordShape::from_keyword(s).map(Shape::Record))
    }

    /// Polygon shapes first, then record shapes.
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        PolygonShape::keywords().chain(RecordShape::keywords())
    }
}

/// `headport`/`tailport`: `port[:compass]` or a bare compass point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortPos {
    pub port: Option<String>,
    pub compass: Option<CompassPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_exact() {
        assert_eq!(RankDir::from_keyword("LR"), Some(RankDir::Lr));
        assert_eq!(RankDir::from_keyword("lr"), None);
        assert_eq!(Splines::from_keyword(""), Some(Splines::Empty));
        assert_eq!(CompassPoint::from_keyword("_"), Some(CompassPoint::Center));
    }

    #[test]
    fn keywords_keep_declaration_order() {
        let dirs: Vec<_> = DirType::keywords().collect();
        assert_eq!(dirs, ["forward", "back", "both", "none"]);
    }

    #[test]
    fn shape_covers_polygons_and_records() {
        assert_eq!(Shape::from_keyword("box"), Some(Shape::Polygon(PolygonShape::Box)));
        assert_eq!(Shape::from_keyword("Mrecord"), Some(Shape::Record(RecordShape::Mrecord)));
        assert_eq!(Shape::from_keyword("Box"), None);
        assert_eq!(Shape::keywords().last(), Some("Mrecord"));
        assert_eq!(Shape::keywords().count(), PolygonShape::ALL.len() + 2);
    }
}

/// Primitive arrow shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Box,
    Crow,
    Curve,
    Icurve,
    Diamond,
    Dot,
    Inv,
    None,
    Normal,
    Tee,
    Vee,
}

impl Primitive {
    pub const ALL: &'static [Primitive] = &[
        Primitive::Box,
        Primitive::Crow,
        Primitive::Curve,
        Primitive::Icurve,
        Primitive::Diamond,
        Primitive::Dot,
        Primitive::Inv,
        Primitive::None,
        Primitive::Normal,
        Primitive::Tee,
        Primitive::Vee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Box => "box",
            Primitive::Crow => "crow",
            Primitive::Curve => "curve",
            Primitive::Icurve => "icurve",
            Primitive::Diamond => "diamond",
            Primitive::Dot => "dot",
            Primitive::Inv => "inv",
            Primitive::None => "none",
            Primitive::Normal => "normal",
            Primitive::Tee => "tee",
            Primitive::Vee => "vee",
        }
    }

    /// Shapes that have no hollow variant.
    pub fn accepts_open(&self) -> bool {
        !matches!(
            self,
            Primitive::Crow
                | Primitive::Curve
                | Primitive::Icurve
                | Primitive::None
                | Primitive::Tee
                | Primitive::Vee
        )
    }

    pub fn accepts_side(&self) -> bool {
        !matches!(self, Primitive::Dot | Primitive::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_char(&self) -> char {
        match self {
            Side::Left => 'l',
            Side::Right => 'r',
        }
    }
}

/// Single-token shapes kept for backwards compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeprecatedShape {
    Ediamond,
    Open,
    Halfopen,
    Empty,
    Invempty,
}

impl DeprecatedShape {
    pub const ALL: &'static [DeprecatedShape] = &[
        DeprecatedShape::Ediamond,
        DeprecatedShape::Open,
        DeprecatedShape::Halfopen,
        DeprecatedShape::Empty,
        DeprecatedShape::Invempty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeprecatedShape::Ediamond => "ediamond",
            DeprecatedShape::Open => "open",
            DeprecatedShape::Halfopen => "halfopen",
            DeprecatedShape::Empty => "empty",
            DeprecatedShape::Invempty => "invempty",
        }
    }

    /// The modern spelling Graphviz renders in its place.
    pub fn modern_equivalent(&self) -> ArrowShape {
        let (open, side, primitive) = match self {
            DeprecatedShape::Ediamond => (true, None, Primitive::Diamond),
            DeprecatedShape::Open => (false, None, Primitive::Vee),
            DeprecatedShape::Halfopen => (false, Some(Side::Left), Primitive::Vee),
            DeprecatedShape::Empty => (true, None, Primitive::Normal),
            DeprecatedShape::Invempty => (true, None, Primitive::Inv),
        };
        ArrowShape::Modern {
            open,
            side,
            primitive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowShape {
    Modern {
        open: bool,
        side: Option<Side>,
        primitive: Primitive,
    },
    Deprecated(DeprecatedShape),
}

impl ArrowShape {
    pub fn primitive(primitive: Primitive) -> Self {
        ArrowShape::Modern {
            open: false,
            side: None,
            primitive,
        }
    }
}

/// One to four arrow shapes, drawn from the edge end outwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrowType {
    pub shapes: Vec<ArrowShape>,
}

/// `x,y` with an optional `!` marking the position as fixed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub pinned: bool,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pinned: false,
        }
    }

    pub fn pinned(x: f64, y: f64) -> Self {
        Self { x, y, pinned: true }
    }
}

/// Lower-left and upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

/// One spline: optional start/end arrow points, then the control points.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub points: Vec<Point>,
}

/// `pos` of an edge: one or more splines separated by `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineType {
    pub splines: Vec<Spline>,
}

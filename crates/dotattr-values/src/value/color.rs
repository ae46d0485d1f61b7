/// `#rrggbb[aa]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    pub fn with_alpha(mut self, a: u8) -> Self {
        self.a = Some(a);
        self
    }
}

/// Hue, saturation and value, each nominally in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColor {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// A color name, optionally qualified with the scheme it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedColor {
    pub scheme: Option<String>,
    pub name: String,
}

impl NamedColor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scheme: None,
            name: name.into(),
        }
    }

    pub fn in_scheme(scheme: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.into()),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Rgb(RgbColor),
    Hsv(HsvColor),
    Named(NamedColor),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedColor {
    pub color: Color,
    pub weight: Option<f64>,
}

/// `color[;weight](:color[;weight])*`
#[derive(Debug, Clone, PartialEq)]
pub struct ColorList {
    pub entries: Vec<WeightedColor>,
}

impl ColorList {
    pub fn single(color: Color) -> Self {
        Self {
            entries: vec![WeightedColor {
                color,
                weight: None,
            }],
        }
    }

    pub fn colors(&self) -> impl Iterator<Item = &Color> {
        self.entries.iter().map(|e| &e.color)
    }
}

impl From<Color> for ColorList {
    fn from(color: Color) -> Self {
        ColorList::single(color)
    }
}

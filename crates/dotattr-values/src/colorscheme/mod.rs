//! Color scheme registry.
//!
//! Two schemes hold color names (`x11`, `svg`); every Brewer scheme holds
//! the indices `1..=n`. The registry is built on first use and never changes
//! afterwards.

mod brewer;
mod svg;
mod x11;

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Scheme in effect when nothing in scope declares `colorscheme`.
pub const DEFAULT_SCHEME: &str = "x11";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Palette {
    /// Sorted color names.
    Names(Vec<String>),
    /// Colors addressed as `1` through `n`.
    Indexed(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    name: String,
    palette: Palette,
}

impl ColorScheme {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether colors are addressed by name rather than by index.
    pub fn is_string_scheme(&self) -> bool {
        matches!(self.palette, Palette::Names(_))
    }

    pub fn len(&self) -> usize {
        match &self.palette {
            Palette::Names(names) => names.len(),
            Palette::Indexed(n) => usize::from(*n),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership of a color name. Names compare case-insensitively.
    pub fn contains(&self, color: &str) -> bool {
        match &self.palette {
            Palette::Names(names) => names
                .binary_search(&color.to_ascii_lowercase())
                .is_ok(),
            Palette::Indexed(n) => color
                .parse::<u8>()
                .is_ok_and(|i| (1..=*n).contains(&i)),
        }
    }

    /// Every valid color name, in palette order.
    pub fn entries(&self) -> Vec<String> {
        match &self.palette {
            Palette::Names(names) => names.clone(),
            Palette::Indexed(n) => (1..=*n).map(|i| i.to_string()).collect(),
        }
    }
}

static SCHEMES: LazyLock<BTreeMap<String, ColorScheme>> = LazyLock::new(|| {
    let mut schemes = BTreeMap::new();
    let mut add = |name: String, palette: Palette| {
        schemes.insert(name.clone(), ColorScheme { name, palette });
    };

    add("x11".into(), Palette::Names(x11::names()));
    let mut svg_names: Vec<String> = svg::NAMES.iter().map(|n| n.to_string()).collect();
    svg_names.sort();
    add("svg".into(), Palette::Names(svg_names));
    for (name, size) in brewer::schemes() {
        add(name, Palette::Indexed(size));
    }

    tracing::debug!(count = schemes.len(), "Built color scheme registry");
    schemes
});

/// Look up a scheme by its exact name.
pub fn scheme(name: &str) -> Option<&'static ColorScheme> {
    SCHEMES.get(name)
}

/// All scheme names, alphabetically.
pub fn scheme_names() -> impl Iterator<Item = &'static str> {
    SCHEMES.keys().map(String::as_str)
}

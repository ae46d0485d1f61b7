//! Brewer palette families and the sizes each one comes in.

/// `(family, smallest size, largest size)`
pub(super) const FAMILIES: &[(&str, u8, u8)] = &[
    ("accent", 3, 8),
    ("blues", 3, 9),
    ("brbg", 3, 11),
    ("bugn", 3, 9),
    ("bupu", 3, 9),
    ("dark2", 3, 8),
    ("gnbu", 3, 9),
    ("greens", 3, 9),
    ("greys", 3, 9),
    ("oranges", 3, 9),
    ("orrd", 3, 9),
    ("paired", 3, 12),
    ("pastel1", 3, 9),
    ("pastel2", 3, 8),
    ("piyg", 3, 11),
    ("prgn", 3, 11),
    ("pubu", 3, 9),
    ("pubugn", 3, 9),
    ("puor", 3, 11),
    ("purd", 3, 9),
    ("purples", 3, 9),
    ("rdbu", 3, 11),
    ("rdgy", 3, 11),
    ("rdpu", 3, 9),
    ("rdylbu", 3, 11),
    ("rdylgn", 3, 11),
    ("reds", 3, 9),
    ("set1", 3, 9),
    ("set2", 3, 8),
    ("set3", 3, 12),
    ("spectral", 3, 11),
    ("ylgn", 3, 9),
    ("ylgnbu", 3, 9),
    ("ylorbr", 3, 9),
    ("ylorrd", 3, 9),
];

/// Every `(scheme name, color count)` pair, e.g. `("brbg10", 10)`.
pub(super) fn schemes() -> impl Iterator<Item = (String, u8)> {
    FAMILIES
        .iter()
        .flat_map(|&(family, min, max)| (min..=max).map(move |n| (format!("{family}{n}"), n)))
}

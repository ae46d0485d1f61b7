//! X11 color names as understood by Graphviz.

/// Base names. `true` marks names that also exist with suffixes `1`..`4`.
const BASE: &[(&str, bool)] = &[
    ("aliceblue", false),
    ("antiquewhite", true),
    ("aquamarine", true),
    ("azure", true),
    ("beige", false),
    ("bisque", true),
    ("black", false),
    ("blanchedalmond", false),
    ("blue", true),
    ("blueviolet", false),
    ("brown", true),
    ("burlywood", true),
    ("cadetblue", true),
    ("chartreuse", true),
    ("chocolate", true),
    ("coral", true),
    ("cornflowerblue", false),
    ("cornsilk", true),
    ("crimson", false),
    ("cyan", true),
    ("darkgoldenrod", true),
    ("darkgreen", false),
    ("darkkhaki", false),
    ("darkolivegreen", true),
    ("darkorange", true),
    ("darkorchid", true),
    ("darksalmon", false),
    ("darkseagreen", true),
    ("darkslateblue", false),
    ("darkslategray", true),
    ("darkslategrey", false),
    ("darkturquoise", false),
    ("darkviolet", false),
    ("deeppink", true),
    ("deepskyblue", true),
    ("dimgray", false),
    ("dimgrey", false),
    ("dodgerblue", true),
    ("firebrick", true),
    ("floralwhite", false),
    ("forestgreen", false),
    ("gainsboro", false),
    ("ghostwhite", false),
    ("gold", true),
    ("goldenrod", true),
    ("gray", false),
    ("green", true),
    ("greenyellow", false),
    ("grey", false),
    ("honeydew", true),
    ("hotpink", true),
    ("indianred", true),
    ("indigo", false),
    ("invis", false),
    ("ivory", true),
    ("khaki", true),
    ("lavender", false),
    ("lavenderblush", true),
    ("lawngreen", false),
    ("lemonchiffon", true),
    ("lightblue", true),
    ("lightcoral", false),
    ("lightcyan", true),
    ("lightgoldenrod", true),
    ("lightgoldenrodyellow", false),
    ("lightgray", false),
    ("lightgrey", false),
    ("lightpink", true),
    ("lightsalmon", true),
    ("lightseagreen", false),
    ("lightskyblue", true),
    ("lightslateblue", false),
    ("lightslategray", false),
    ("lightslategrey", false),
    ("lightsteelblue", true),
    ("lightyellow", true),
    ("limegreen", false),
    ("linen", false),
    ("magenta", true),
    ("maroon", true),
    ("mediumaquamarine", false),
    ("mediumblue", false),
    ("mediumorchid", true),
    ("mediumpurple", true),
    ("mediumseagreen", false),
    ("mediumslateblue", false),
    ("mediumspringgreen", false),
    ("mediumturquoise", false),
    ("mediumvioletred", false),
    ("midnightblue", false),
    ("mintcream", false),
    ("mistyrose", true),
    ("moccasin", false),
    ("navajowhite", true),
    ("navy", false),
    ("navyblue", false),
    ("none", false),
    ("oldlace", false),
    ("olivedrab", true),
    ("orange", true),
    ("orangered", true),
    ("orchid", true),
    ("palegoldenrod", false),
    ("palegreen", true),
    ("paleturquoise", true),
    ("palevioletred", true),
    ("papayawhip", false),
    ("peachpuff", true),
    ("peru", false),
    ("pink", true),
    ("plum", true),
    ("powderblue", false),
    ("purple", true),
    ("red", true),
    ("rosybrown", true),
    ("royalblue", true),
    ("saddlebrown", false),
    ("salmon", true),
    ("sandybrown", false),
    ("seagreen", true),
    ("seashell", true),
    ("sienna", true),
    ("skyblue", true),
    ("slateblue", true),
    ("slategray", true),
    ("slategrey", false),
    ("snow", true),
    ("springgreen", true),
    ("steelblue", true),
    ("tan", true),
    ("thistle", true),
    ("tomato", true),
    ("transparent", false),
    ("turquoise", true),
    ("violet", false),
    ("violetred", true),
    ("wheat", true),
    ("white", false),
    ("whitesmoke", false),
    ("yellow", true),
    ("yellowgreen", false),
];

/// Every X11 name, including numbered variants and `gray0`..`grey100`.
pub(super) fn names() -> Vec<String> {
    let mut names = Vec::with_capacity(BASE.len() * 3 + 202);
    for &(name, numbered) in BASE {
        names.push(name.to_string());
        if numbered {
            names.extend((1..=4).map(|i| format!("{name}{i}")));
        }
    }
    for prefix in ["gray", "grey"] {
        names.extend((0..=100).map(|i| format!("{prefix}{i}")));
    }
    names.sort();
    names
}

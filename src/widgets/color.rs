//! CSS color validation for textual widgets.

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
    "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen",
    "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat",
    "white", "whitesmoke", "yellow", "yellowgreen",
];

/// True if `value` is a CSS color the renderer accepts.
pub fn is_css_color(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    if value == "transparent" || value == "currentcolor" {
        return true;
    }
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    if let Some((name, rest)) = value.split_once('(') {
        let Some(args) = rest.strip_suffix(')') else {
            return false;
        };
        return match name.trim_end() {
            "rgb" | "rgba" => is_rgb(args),
            "hsl" | "hsla" => is_hsl(args),
            _ => false,
        };
    }
    NAMED_COLORS.binary_search(&value.as_str()).is_ok()
}

/// Split function arguments in either the comma or the space/slash syntax.
fn components(args: &str) -> Option<([&str; 3], Option<&str>)> {
    if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        return match parts.as_slice() {
            [a, b, c] => Some(([*a, *b, *c], None)),
            [a, b, c, alpha] => Some(([*a, *b, *c], Some(*alpha))),
            _ => None,
        };
    }
    let (main, alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };
    let parts: Vec<&str> = main.split_whitespace().collect();
    match parts.as_slice() {
        [a, b, c] => Some(([*a, *b, *c], alpha)),
        _ => None,
    }
}

fn number(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(f64::is_finite)
}

fn percentage(s: &str) -> bool {
    s.strip_suffix('%').is_some_and(number)
}

fn number_or_percentage(s: &str) -> bool {
    number(s) || percentage(s)
}

fn hue(s: &str) -> bool {
    ["deg", "grad", "rad", "turn"]
        .iter()
        .find_map(|unit| s.strip_suffix(unit))
        .map_or_else(|| number(s), number)
}

fn alpha_ok(alpha: Option<&str>) -> bool {
    alpha.map_or(true, number_or_percentage)
}

fn is_rgb(args: &str) -> bool {
    components(args).is_some_and(|(channels, alpha)| {
        channels.iter().all(|c| number_or_percentage(c)) && alpha_ok(alpha)
    })
}

fn is_hsl(args: &str) -> bool {
    components(args).is_some_and(|([h, s, l], alpha)| {
        hue(h) && number_or_percentage(s) && number_or_percentage(l) && alpha_ok(alpha)
    })
}

use plotters::style::RGBColor;

/// Colour used for algorithms that match no family.
pub const DEFAULT_COLOR: RGBColor = RGBColor(0x74, 0xb9, 0xff);

/// Algorithm families and their colours, matched in this order.
pub const FAMILY_COLORS: [(&str, RGBColor); 8] = [
    ("Brute Force", RGBColor(0xff, 0x6b, 0x6b)),
    ("Backtracking", RGBColor(0x4e, 0xcd, 0xc4)),
    ("Dynamic Programming", RGBColor(0x45, 0xb7, 0xd1)),
    ("Greedy-A", RGBColor(0x96, 0xce, 0xb4)),
    ("Greedy-B", RGBColor(0xff, 0xea, 0xa7)),
    ("Approximation", RGBColor(0xdd, 0xa0, 0xdd)),
    ("ILP (Recursive)", RGBColor(0xfd, 0x79, 0xa8)),
    ("ILP (Python)", RGBColor(0xa2, 0x9b, 0xfe)),
];

/// Colours cycled over the bars of the accuracy chart.
pub const ACCURACY_COLORS: [RGBColor; 5] = [
    RGBColor(0x96, 0xce, 0xb4),
    RGBColor(0xff, 0xea, 0xa7),
    RGBColor(0xdd, 0xa0, 0xdd),
    RGBColor(0xfd, 0x79, 0xa8),
    RGBColor(0xa2, 0x9b, 0xfe),
];

/// The qualitative Set3 palette.
pub const SET3: [RGBColor; 12] = [
    RGBColor(0x8d, 0xd3, 0xc7),
    RGBColor(0xff, 0xff, 0xb3),
    RGBColor(0xbe, 0xba, 0xda),
    RGBColor(0xfb, 0x80, 0x72),
    RGBColor(0x80, 0xb1, 0xd3),
    RGBColor(0xfd, 0xb4, 0x62),
    RGBColor(0xb3, 0xde, 0x69),
    RGBColor(0xfc, 0xcd, 0xe5),
    RGBColor(0xd9, 0xd9, 0xd9),
    RGBColor(0xbc, 0x80, 0xbd),
    RGBColor(0xcc, 0xeb, 0xc5),
    RGBColor(0xff, 0xed, 0x6f),
];

/// Colour of the first family whose name occurs in `name`, ignoring case.
pub fn family_color(name: &str) -> RGBColor {
    let name = name.to_lowercase();
    FAMILY_COLORS
        .iter()
        .find(|(family, _)| name.contains(&family.to_lowercase()))
        .map_or(DEFAULT_COLOR, |&(_, color)| color)
}

/// Colour of the `index`-th of `count` points, spread evenly over [`SET3`].
pub fn set3_color(index: usize, count: usize) -> RGBColor {
    if count <= 1 {
        return SET3[0];
    }
    let position = index as f64 / (count - 1) as f64;
    let slot = (position * SET3.len() as f64) as usize;
    SET3[slot.min(SET3.len() - 1)]
}

/// Colour of the `index`-th accuracy bar.
pub fn accuracy_color(index: usize) -> RGBColor {
    ACCURACY_COLORS[index % ACCURACY_COLORS.len()]
}

//! The 20-swatch categorical palette used for descriptors without an override
//!
//! Swatches come in dark/light pairs of ten hues (the `tab20` qualitative
//! palette). Descriptor `i` gets swatch `i % 20`, so the first twenty
//! descriptors are all distinct and later ones cycle.

pub const TAB20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c",
    "#98df8a", "#d62728", "#ff9896", "#9467bd", "#c5b0d5",
    "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f",
    "#c7c7c7", "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Color for the descriptor at `position` in first-seen order.
pub fn palette_color(position: usize) -> &'static str {
    TAB20[position % TAB20.len()]
}

/// Check a color string is `#rgb` or `#rrggbb`.
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

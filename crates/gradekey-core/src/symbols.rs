//! Unicode math glyph normalization.

/// Glyphs rewritten to their ASCII spelling, in application order.
const SYMBOL_TABLE: &[(char, &str)] = &[
    ('≥', ">="),
    ('≤', "<="),
    ('≠', "!="),
    ('＞', ">"),
    ('＜', "<"),
    ('＝', "="),
];

/// Rewrite full-width and Unicode relational glyphs to ASCII.
///
/// Total and pure: text without any of the glyphs comes back unchanged.
pub fn normalize_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match SYMBOL_TABLE.iter().find(|(glyph, _)| *glyph == ch) {
            Some((_, ascii)) => out.push_str(ascii),
            None => out.push(ch),
        }
    }
    out
}

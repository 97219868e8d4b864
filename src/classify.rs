#[inline]
pub fn is_whitespace(c: char) -> bool {
    // Include U+FEFF (BOM) as whitespace-equivalent so it can be skipped at root.
    matches!(
        c,
        '\u{0009}' | '\u{000A}' | '\u{000D}' | '\u{0020}' | '\u{FEFF}'
    )
}

/// `"` and the curly double-quote variants (`“` `”`).
#[inline]
pub fn is_double_quote_like(c: char) -> bool {
    c == '"' || c == '\u{201C}' || c == '\u{201D}'
}

/// `'` and the curly/backtick/acute single-quote variants (`‘` `’` `` ` `` `´`).
#[inline]
pub fn is_single_quote_like(c: char) -> bool {
    matches!(c, '\u{27}' | '\u{2018}' | '\u{2019}' | '\u{60}' | '\u{B4}')
}

/// Angle quotes (`‹` `›`) and guillemets (`«` `»`) that some locales use in
/// place of straight or curly quotes.
#[inline]
pub fn is_angle_or_guillemet_quote(c: char) -> bool {
    matches!(c, '\u{2039}' | '\u{203A}' | '\u{00AB}' | '\u{00BB}')
}

/// Any quote-like character this crate normalizes to `"`: straight double,
/// curly double, angle quotes, and guillemets. Single-quote variants are
/// handled separately since they may open either a JSON string delimiter.
#[inline]
pub fn is_normalizable_double_quote(c: char) -> bool {
    is_double_quote_like(c) || is_angle_or_guillemet_quote(c)
}

#[inline]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

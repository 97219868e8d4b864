use super::lex::skip_ws_and_comments;
use crate::emit::{Emitter, JRResult};

/// Parse a `'`- or `"`-delimited literal, tolerating `+`-concatenation and
/// the `ident"..."` embedded-quote pattern some LLM output produces, then
/// emit it as one JSON string.
pub fn parse_string_literal_concat_fast<E: Emitter>(
    input: &mut &str,
    out: &mut E,
) -> JRResult<()> {
    let s = *input;
    let quote = match s.as_bytes().first() {
        Some(&b'"') => b'"',
        Some(&b'\'') => b'\'',
        _ => return Ok(()),
    };

    let bytes = s.as_bytes();
    let mut i = 1usize;
    let mut escape = false;
    while i < bytes.len() {
        let b = bytes[i];
        if escape {
            escape = false;
            i += 1;
            continue;
        }
        if b == b'\\' {
            escape = true;
            i += 1;
            continue;
        }
        if b == quote {
            i += 1;
            break;
        }
        if b >= 0x80 {
            let ch = s[i..].chars().next().unwrap();
            i += ch.len_utf8();
        } else {
            i += 1;
        }
    }

    let after_string = &s[i..];
    let mut look = after_string;
    skip_ws_and_comments(&mut look);
    let has_concat = look.as_bytes().first() == Some(&b'+');

    let has_embed = if !has_concat {
        let look_bytes = look.as_bytes();
        let mut id_end = 0usize;
        while id_end < look_bytes.len() {
            let b = look_bytes[id_end];
            if id_end == 0 {
                if !(b.is_ascii_alphabetic() || b == b'_' || b == b'$') {
                    break;
                }
            } else if !(b.is_ascii_alphanumeric() || b == b'_' || b == b'$') {
                break;
            }
            id_end += 1;
        }
        id_end > 0
            && id_end < look_bytes.len()
            && matches!(look_bytes[id_end], b'"' | b'\'')
    } else {
        false
    };

    if !has_concat && !has_embed {
        let lit = parse_one_string_literal(input)?;
        return emit_json_string_from_lit(out, &lit);
    }

    let lit = parse_one_string_literal(input)?;
    let mut acc = String::new();
    acc.push_str(&lit);
    *input = after_string;
    finish_string_concat(input, out, acc)
}

fn finish_string_concat<E: Emitter>(input: &mut &str, out: &mut E, mut acc: String) -> JRResult<()> {
    loop {
        skip_ws_and_comments(input);
        if let Some(r) = input.strip_prefix('+') {
            *input = r;
            skip_ws_and_comments(input);
            let lit2 = parse_one_string_literal(input)?;
            acc.push_str(&lit2);
            continue;
        }

        let sref = *input;
        let mut id_end = 0usize;
        for (i, ch) in sref.char_indices() {
            if i == 0 {
                if !(ch.is_ascii_alphabetic() || ch == '_' || ch == '$') {
                    break;
                }
            } else if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '$') {
                break;
            }
            id_end = i + ch.len_utf8();
        }
        if id_end > 0 {
            let ident = &sref[..id_end];
            let rest = &sref[id_end..];
            if let Some(q) = rest.chars().next() {
                if q == '"' || q == '\'' {
                    *input = &rest[q.len_utf8()..];
                    acc.push(q);
                    acc.push_str(ident);
                    acc.push(q);
                    let s2 = *input;
                    let mut idx = 0usize;
                    while idx < s2.len() {
                        let ch = s2[idx..].chars().next().unwrap();
                        let l = ch.len_utf8();
                        if ch == q {
                            *input = &s2[idx + l..];
                            break;
                        }
                        acc.push(ch);
                        idx += l;
                    }
                    continue;
                }
            }
        }
        break;
    }
    emit_json_string_from_lit(out, &acc)
}

pub fn parse_one_string_literal(input: &mut &str) -> JRResult<String> {
    let s = *input;
    let mut it = s.char_indices();
    let (start_i, quote) = match it.next() {
        Some((i, '"')) => (i, '"'),
        Some((i, '\'')) => (i, '\''),
        _ => return Ok(String::new()),
    };
    let mut i = start_i + 1;
    let mut out = String::new();
    let mut escape = false;
    while i < s.len() {
        let ch = s[i..].chars().next().unwrap();
        let l = ch.len_utf8();
        i += l;
        if escape {
            escape = false;
            match ch {
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                '\'' => out.push('\''),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'b' => out.push('\u{0008}'),
                'f' => out.push('\u{000C}'),
                'u' => {
                    if i + 4 <= s.len() {
                        let hex = &s[i..i + 4];
                        if let Ok(v) = u16::from_str_radix(hex, 16) {
                            let is_high = (0xD800..=0xDBFF).contains(&v);
                            let is_low = (0xDC00..=0xDFFF).contains(&v);
                            if !is_high && !is_low {
                                if let Some(c) = char::from_u32(v as u32) {
                                    out.push(c);
                                }
                                i += 4;
                            } else if is_high {
                                if i + 6 <= s.len()
                                    && s[i + 4..].starts_with("\\u")
                                    && i + 10 <= s.len()
                                {
                                    let lo_hex = &s[i + 6..i + 10];
                                    if let Ok(lo) = u16::from_str_radix(lo_hex, 16) {
                                        if (0xDC00..=0xDFFF).contains(&lo) {
                                            let hi = v as u32 - 0xD800;
                                            let lo10 = lo as u32 - 0xDC00;
                                            let code = 0x1_0000 + ((hi << 10) | lo10);
                                            if let Some(c) = char::from_u32(code) {
                                                out.push(c);
                                            }
                                            i += 10;
                                            continue;
                                        }
                                    }
                                }
                                i += 4;
                            } else {
                                i += 4;
                            }
                        } else {
                            i += 4;
                        }
                    }
                }
                _ => out.push(ch),
            }
            continue;
        }
        if ch == '\\' {
            escape = true;
            continue;
        }
        if ch == quote {
            *input = &s[i..];
            return Ok(out);
        }
        out.push(ch);
    }
    // Unclosed string: best-effort close at end of input.
    *input = &s[s.len()..];
    Ok(out)
}

/// Strict variant for object keys: stops at the first matching closing quote.
pub fn parse_one_string_key_strict(input: &mut &str) -> JRResult<String> {
    let s = *input;
    let mut it = s.char_indices();
    let (start_i, quote) = match it.next() {
        Some((i, '"')) => (i, '"'),
        Some((i, '\'')) => (i, '\''),
        _ => return Ok(String::new()),
    };
    let mut i = start_i + 1;
    let mut out = String::new();
    let mut escape = false;
    while i < s.len() {
        let ch = s[i..].chars().next().unwrap();
        let l = ch.len_utf8();
        i += l;
        if escape {
            escape = false;
            out.push(ch);
            continue;
        }
        if ch == '\\' {
            escape = true;
            continue;
        }
        if ch == quote {
            *input = &s[i..];
            return Ok(out);
        }
        out.push(ch);
    }
    *input = &s[s.len()..];
    Ok(out)
}

pub fn emit_json_string_from_lit<E: Emitter>(out: &mut E, s: &str) -> JRResult<()> {
    if s.is_ascii() {
        let bytes = s.as_bytes();
        if !bytes.iter().any(|&b| b == b'"' || b == b'\\' || b <= 0x1F) {
            out.emit_char('"')?;
            out.emit_str(s)?;
            return out.emit_char('"');
        }
    }

    out.emit_char('"')?;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        let code = ch as u32;
        let needs_escape = ch == '"' || ch == '\\' || code <= 0x1F;
        if !needs_escape {
            continue;
        }
        if i > start {
            out.emit_str(&s[start..i])?;
        }
        match ch {
            '"' => out.emit_str("\\\"")?,
            '\\' => out.emit_str("\\\\")?,
            '\u{08}' => out.emit_str("\\b")?,
            '\u{0C}' => out.emit_str("\\f")?,
            '\n' => out.emit_str("\\n")?,
            '\r' => out.emit_str("\\r")?,
            '\t' => out.emit_str("\\t")?,
            _ => {
                let esc = format!("\\u{:04X}", code);
                out.emit_str(&esc)?;
            }
        }
        start = i + ch.len_utf8();
    }
    if start < s.len() {
        out.emit_str(&s[start..])?;
    }
    out.emit_char('"')
}

use crate::emit::{Emitter, JRResult};

use super::strings::emit_json_string_from_lit;

/// Parse a number-like token starting at `input`, tolerating a handful of
/// malformed shapes (leading/trailing dot, doubled sign, stray non-finite
/// keywords) before giving up and re-emitting the token as a JSON string.
pub fn parse_number_token<E: Emitter>(input: &mut &str, out: &mut E) -> JRResult<()> {
    let s = *input;

    if let Some(rest) = s.strip_prefix("-Infinity") {
        *input = rest;
        return out.emit_str("null");
    }
    if let Some(rest) = s.strip_prefix("Infinity") {
        *input = rest;
        return out.emit_str("null");
    }
    if let Some(rest) = s.strip_prefix("NaN") {
        *input = rest;
        return out.emit_str("null");
    }

    let mut end_seg = 0usize;
    while end_seg < s.len() {
        let ch = s[end_seg..].chars().next().unwrap();
        let l = ch.len_utf8();
        if ch.is_whitespace() || matches!(ch, ',' | '}' | ']' | ')' | '(' | ':') {
            break;
        }
        if ch == '/' {
            let p = end_seg + l;
            if p < s.len() {
                if let Some(nc) = s[p..].chars().next() {
                    if nc == '*' || nc == '/' {
                        break;
                    }
                }
            }
        }
        end_seg += l;
    }
    let seg = &s[..end_seg];

    let mut dot_count = 0usize;
    let mut has_alpha_non_e = false;
    let mut has_slash = false;
    let mut hyphen_suspicious = false;
    let mut prev: Option<char> = None;
    for ch in seg.chars() {
        match ch {
            '.' => dot_count += 1,
            'a'..='z' | 'A'..='Z' if ch != 'e' && ch != 'E' => has_alpha_non_e = true,
            '/' => has_slash = true,
            '-' => {
                if let Some(p) = prev {
                    if p != 'e' && p != 'E' {
                        hyphen_suspicious = true;
                    }
                }
            }
            _ => {}
        }
        prev = Some(ch);
    }
    if has_alpha_non_e || has_slash || dot_count > 1 || hyphen_suspicious {
        *input = &s[end_seg..];
        return emit_json_string_from_lit(out, seg);
    }

    let mut i = 0usize;
    let mut started_with_dot = false;
    let mut ends_with_dot = false;
    if s.starts_with('-') {
        i += 1;
    }
    if i < s.len() {
        let ch = s[i..].chars().next().unwrap();
        if ch == '.' {
            started_with_dot = true;
            i += 1;
            let mut any = 0usize;
            while i < s.len() {
                let c = s[i..].chars().next().unwrap();
                if c.is_ascii_digit() {
                    i += 1;
                    any += 1;
                } else {
                    break;
                }
            }
            if any == 0 {
                *input = &s[end_seg..];
                return emit_json_string_from_lit(out, seg);
            }
        } else {
            while i < s.len() {
                let c = s[i..].chars().next().unwrap();
                if c.is_ascii_digit() {
                    i += 1;
                } else {
                    break;
                }
            }
            if i < s.len() {
                let c = s[i..].chars().next().unwrap();
                if c == '.' {
                    i += 1;
                    let mut anyf = 0usize;
                    while i < s.len() {
                        let c2 = s[i..].chars().next().unwrap();
                        if c2.is_ascii_digit() {
                            i += 1;
                            anyf += 1;
                        } else {
                            break;
                        }
                    }
                    if anyf == 0 {
                        ends_with_dot = true;
                    }
                }
            }
        }
    }

    let mut exp_invalid = false;
    let mut advance_to = 0usize;
    if i < s.len() {
        let c = s[i..].chars().next().unwrap();
        if c == 'e' || c == 'E' {
            let base_end = i;
            i += 1;
            if i < s.len() {
                let c2 = s[i..].chars().next().unwrap();
                if c2 == '+' || c2 == '-' {
                    i += 1;
                }
            }
            let mut any = 0usize;
            while i < s.len() {
                let c3 = s[i..].chars().next().unwrap();
                if c3.is_ascii_digit() {
                    i += 1;
                    any += 1;
                } else {
                    break;
                }
            }
            if any == 0 {
                advance_to = i;
                i = base_end;
                exp_invalid = true;
            }
        }
    }

    if i > end_seg {
        i = end_seg;
    }
    let tok = &s[..i];
    let consumed_end = if exp_invalid && advance_to > i { advance_to } else { i };
    *input = &s[consumed_end..];

    if tok.is_empty() {
        return out.emit_str("0");
    }

    if started_with_dot {
        if let Some(stripped) = tok.strip_prefix('-') {
            return out.emit_str(&format!("-0{stripped}"));
        }
        return out.emit_str(&format!("0{tok}"));
    }
    if ends_with_dot {
        return out.emit_str(&format!("{tok}0"));
    }

    out.emit_str(tok)
}

use memchr::memchr2;

use super::lex::skip_ws_and_comments;
use super::strings::{emit_json_string_from_lit, parse_one_string_key_strict};
use crate::emit::{Emitter, JRResult};
use crate::error::{RepairError, RepairErrorKind};

use super::parse_value;

pub fn parse_object<E: Emitter>(
    input: &mut &str,
    depth: usize,
    max_depth: usize,
    out: &mut E,
) -> JRResult<()> {
    if !input.starts_with('{') {
        return Ok(());
    }
    if depth >= max_depth {
        return Err(RepairError::new(RepairErrorKind::NestingDepthExceeded, 0));
    }
    *input = &input[1..];
    out.emit_char('{')?;
    if let Some('}') = fast_ws_to_only_rbrace(input) {
        out.emit_char('}')?;
        return Ok(());
    }
    skip_ws_and_comments(input);
    let mut first = true;
    loop {
        skip_ws_and_comments(input);
        if input.is_empty() {
            out.emit_char('}')?;
            break;
        }
        if input.starts_with(']') {
            out.emit_char('}')?;
            break;
        }
        if input.starts_with('}') {
            *input = &input[1..];
            out.emit_char('}')?;
            break;
        }
        if let Some(delim) = fast_ws_to_comma_or_rbrace(input) {
            match delim {
                ',' => {}
                '}' => {
                    out.emit_char('}')?;
                    break;
                }
                _ => unreachable!(),
            }
        } else {
            if input.starts_with(',') {
                *input = &input[1..];
            }
            if input.starts_with('}') {
                *input = &input[1..];
                out.emit_char('}')?;
                break;
            }
        }
        if !first {
            out.emit_char(',')?;
        }
        first = false;

        skip_ws_and_comments(input);
        if input.is_empty() {
            out.emit_char('}')?;
            break;
        }
        if input.starts_with('"') || input.starts_with('\'') {
            let k = parse_one_string_key_strict(input)?;
            emit_json_string_from_lit(out, &k)?;
        } else {
            let key = take_key_until_delim_fast(input)
                .unwrap_or_else(|| take_until_delim(input, &[':', '}', ',']));
            let k = key.trim();
            emit_json_string_from_lit(out, k)?;
        }
        skip_ws_and_comments(input);
        if input.starts_with(':') {
            *input = &input[1..];
            out.emit_char(':')?;
        } else {
            out.emit_char(':')?;
        }
        skip_ws_and_comments(input);

        if input.is_empty() {
            out.emit_str("null}")?;
            break;
        }
        parse_value(input, depth + 1, max_depth, out)?;

        if let Some(delim) = fast_ws_to_comma_or_rbrace(input) {
            match delim {
                ',' => {}
                '}' => {
                    out.emit_char('}')?;
                    break;
                }
                _ => unreachable!(),
            }
        } else {
            skip_ws_and_comments(input);
            if input.starts_with('}') {
                *input = &input[1..];
                out.emit_char('}')?;
                break;
            }
            if input.starts_with(',') {
                *input = &input[1..];
            }
        }
    }
    Ok(())
}

fn take_until_delim<'i>(input: &mut &'i str, delims: &[char]) -> &'i str {
    let s = *input;
    let mut end = 0usize;
    for (i, ch) in s.char_indices() {
        if delims.contains(&ch) || ch == '\n' || ch == '\r' {
            break;
        }
        end = i + ch.len_utf8();
    }
    *input = &s[end..];
    &s[..end]
}

#[inline]
fn take_key_until_delim_fast<'i>(input: &mut &'i str) -> Option<&'i str> {
    let s = *input;
    if s.is_empty() {
        return Some("");
    }
    let b = s.as_bytes();
    let mut i = 0usize;
    while i < b.len() {
        match b[i] {
            b' ' | b'\t' | b'\n' | b'\r' | b',' | b'{' | b'}' | b'[' | b']' | b'(' | b')'
            | b':' | b'"' | b'\'' => break,
            b'/' => {
                if i + 1 < b.len() && (b[i + 1] == b'/' || b[i + 1] == b'*') {
                    break;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    let key = &s[..i];
    *input = &s[i..];
    Some(key)
}

#[inline]
fn fast_ws_to_only_rbrace(input: &mut &str) -> Option<char> {
    let s = *input;
    if s.is_empty() {
        return None;
    }
    let bytes = s.as_bytes();
    if let Some(pos) = memchr2(b',', b'}', bytes) {
        if bytes[pos] == b',' {
            return None;
        }
        for &b in &bytes[..pos] {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => {}
                _ => return None,
            }
        }
        *input = &s[pos + 1..];
        Some('}')
    } else {
        None
    }
}

#[inline]
fn fast_ws_to_comma_or_rbrace(input: &mut &str) -> Option<char> {
    let s = *input;
    if s.is_empty() {
        return None;
    }
    let bytes = s.as_bytes();
    if let Some(pos) = memchr2(b',', b'}', bytes) {
        for &b in &bytes[..pos] {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => {}
                _ => return None,
            }
        }
        let delim = bytes[pos] as char;
        *input = &s[pos + 1..];
        Some(delim)
    } else {
        None
    }
}

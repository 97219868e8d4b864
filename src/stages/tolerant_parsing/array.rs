use memchr::memchr2;

use super::lex::skip_ws_and_comments;
use crate::emit::{Emitter, JRResult};
use crate::error::{RepairError, RepairErrorKind};

use super::parse_value;

pub fn parse_array<E: Emitter>(
    input: &mut &str,
    depth: usize,
    max_depth: usize,
    out: &mut E,
) -> JRResult<()> {
    if !input.starts_with('[') {
        return Ok(());
    }
    if depth >= max_depth {
        return Err(RepairError::new(RepairErrorKind::NestingDepthExceeded, 0));
    }
    *input = &input[1..];
    out.emit_char('[')?;
    if let Some(']') = fast_ws_to_only_rbracket(input) {
        out.emit_char(']')?;
        return Ok(());
    }
    skip_ws_and_comments(input);
    let mut first = true;
    'outer: loop {
        skip_ws_and_comments(input);
        if input.is_empty() {
            out.emit_char(']')?;
            break;
        }
        if input.starts_with(']') {
            *input = &input[1..];
            out.emit_char(']')?;
            break;
        }
        if let Some(delim) = fast_ws_to_comma_or_rbracket(input) {
            match delim {
                ',' => {}
                ']' => {
                    out.emit_char(']')?;
                    break;
                }
                _ => unreachable!(),
            }
        } else {
            if input.starts_with(',') {
                *input = &input[1..];
            }
            if input.starts_with(']') {
                *input = &input[1..];
                out.emit_char(']')?;
                break;
            }
        }
        if !first {
            out.emit_char(',')?;
        }
        first = false;
        parse_value(input, depth + 1, max_depth, out)?;
        if let Some(delim) = fast_ws_to_comma_or_rbracket(input) {
            match delim {
                ',' => continue 'outer,
                ']' => {
                    out.emit_char(']')?;
                    break 'outer;
                }
                _ => unreachable!(),
            }
        } else {
            skip_ws_and_comments(input);
            if input.starts_with(',') {
                *input = &input[1..];
            }
        }
    }
    Ok(())
}

#[inline]
fn fast_ws_to_only_rbracket(input: &mut &str) -> Option<char> {
    let s = *input;
    if s.is_empty() {
        return None;
    }
    let bytes = s.as_bytes();
    if let Some(pos) = memchr2(b',', b']', bytes) {
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
        Some(']')
    } else {
        None
    }
}

#[inline]
fn fast_ws_to_comma_or_rbracket(input: &mut &str) -> Option<char> {
    let s = *input;
    if s.is_empty() {
        return None;
    }
    let bytes = s.as_bytes();
    if let Some(pos) = memchr2(b',', b']', bytes) {
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

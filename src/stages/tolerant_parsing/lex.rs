use memchr::{memchr, memchr2};

pub fn skip_bom(input: &mut &str) {
    if let Some(rest) = input.strip_prefix('\u{FEFF}') {
        *input = rest;
    }
}

/// Skip ASCII whitespace, `//` and `/* */` comments, and `#` line comments.
/// Mirrors the comment-skipping rules L1 already applied, kept here too
/// because L5 may be handed text L1 never saw (e.g. content L2/L3 exposed
/// only after delimiter balancing).
#[inline]
pub fn skip_ws_and_comments(input: &mut &str) {
    loop {
        let before_len = input.len();
        let s = *input;
        let bytes = s.as_bytes();
        let mut i = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                b' ' | b'\t' | b'\n' | b'\r' => i += 1,
                _ => break,
            }
        }
        *input = &s[i..];
        if input.is_empty() {
            break;
        }
        if input.as_bytes().starts_with(b"//") {
            let rest = &input[2..];
            if let Some(pos) = memchr2(b'\n', b'\r', rest.as_bytes()) {
                *input = &rest[pos + 1..];
            } else {
                *input = "";
            }
            continue;
        }
        if input.as_bytes().starts_with(b"/*") {
            let rest = &input[2..];
            let bytes = rest.as_bytes();
            let mut off = 0usize;
            let mut closed = false;
            while let Some(p) = memchr(b'*', &bytes[off..]) {
                let idx = off + p;
                if idx + 1 < bytes.len() && bytes[idx + 1] == b'/' {
                    *input = &rest[idx + 2..];
                    closed = true;
                    break;
                }
                off = idx + 1;
            }
            if !closed {
                *input = "";
            }
            continue;
        }
        if input.as_bytes().first() == Some(&b'#') {
            let rest = &input[1..];
            if let Some(pos) = memchr2(b'\n', b'\r', rest.as_bytes()) {
                *input = &rest[pos + 1..];
            } else {
                *input = "";
            }
            continue;
        }
        if before_len == input.len() {
            break;
        }
    }
}

pub fn take_ident(s: &str) -> (&str, &str) {
    let mut end = 0usize;
    for (i, ch) in s.char_indices() {
        if i == 0 {
            if !crate::classify::is_ident_start(ch) {
                break;
            }
        } else if !crate::classify::is_ident_continue(ch) {
            break;
        }
        end = i + ch.len_utf8();
    }
    (&s[..end], &s[end..])
}

/// Take a token until a delimiter: whitespace, `, [ ] { } ( ) : ' "`, or a
/// `/` that starts a comment.
pub fn take_symbol_until_delim<'i>(input: &mut &'i str) -> &'i str {
    let s = *input;
    if s.is_empty() {
        return s;
    }
    let b = s.as_bytes();
    let mut i = 0usize;
    while i < b.len() {
        match b[i] {
            b' ' | b'\t' | b'\n' | b'\r' | b',' | b'[' | b']' | b'{' | b'}' | b'(' | b')'
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
    let tok = &s[..i];
    *input = &s[i..];
    tok
}

use memchr::{memchr, memchr2};

use crate::action::{RepairAction, RepairContext, Stage as StageKind};
use crate::error::RepairError;
use crate::stage::{Stage, StageOutcome};

/// L1: strip everything around the JSON-like payload that isn't part of it.
///
/// Order matters: fenced-block extraction and HTML-wrapper unwrapping run
/// before comment stripping and prose trimming, since a fence or wrapper tag
/// can itself contain `//`-looking text that isn't a comment until the wrapper
/// is gone.
pub struct ContentCleaning;

impl Stage for ContentCleaning {
    fn name(&self) -> &'static str {
        StageKind::ContentCleaning.name()
    }

    fn priority(&self) -> u8 {
        10
    }

    fn supports(&self, _input: &str) -> bool {
        true
    }

    fn process(&self, input: String, ctx: &mut RepairContext) -> Result<StageOutcome, RepairError> {
        let mut s = input;

        if let Some(inner) = extract_single_fence(&s) {
            ctx.record(RepairAction::new(StageKind::ContentCleaning, "stripped markdown code fence"));
            s = inner;
        }

        if let Some(inner) = unwrap_html_wrapper(&s) {
            ctx.record(RepairAction::new(StageKind::ContentCleaning, "unwrapped HTML container tag"));
            s = inner;
        }

        let cleaned = strip_comments(&s);
        if cleaned != s {
            ctx.record(RepairAction::new(StageKind::ContentCleaning, "removed comment outside string literal"));
            s = cleaned;
        }

        if let Some(trimmed) = trim_to_outermost_structure(&s) {
            if trimmed != s {
                ctx.record(RepairAction::new(StageKind::ContentCleaning, "trimmed surrounding prose"));
                s = trimmed;
            }
        }

        Ok(StageOutcome::Continue(s))
    }
}

/// If the entire input is exactly one ```-fenced block (optionally with a
/// language tag on the opening fence), return its body.
fn extract_single_fence(s: &str) -> Option<String> {
    let trimmed = s.trim();
    let start = trimmed.find("```")?;
    let after_open = start + 3;
    let lang_skip = fence_open_lang_newline_len(&trimmed[after_open..]);
    let body_start = after_open + lang_skip;
    let end_rel = trimmed[body_start..].find("```")?;
    let body = &trimmed[body_start..body_start + end_rel];
    let after_close = body_start + end_rel + 3;
    if !trimmed[after_close..].trim().is_empty() {
        return None;
    }
    if !trimmed[..start].trim().is_empty() {
        return None;
    }
    Some(body.to_string())
}

fn fence_open_lang_newline_len(s: &str) -> usize {
    if let Some(pos) = memchr(b'\n', s.as_bytes()) {
        let lang = &s[..pos];
        if lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return pos + 1;
        }
    }
    0
}

/// Strip one layer of a wrapping HTML-ish container tag, e.g.
/// `<pre>{"a":1}</pre>` or `<response>...</response>`, when the whole input
/// is exactly `<tag ...>BODY</tag>`.
fn unwrap_html_wrapper(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if !trimmed.starts_with('<') {
        return None;
    }
    let open_end = memchr(b'>', trimmed.as_bytes())?;
    let tag_head = &trimmed[1..open_end];
    let tag_name: String = tag_head
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if tag_name.is_empty() {
        return None;
    }
    let closing = format!("</{tag_name}>");
    if !trimmed.ends_with(&closing) {
        return None;
    }
    let body_start = open_end + 1;
    let body_end = trimmed.len() - closing.len();
    if body_end <= body_start {
        return None;
    }
    Some(trimmed[body_start..body_end].to_string())
}

/// Remove `//`, `/* */`, and `#` comments that appear outside string
/// literals, leaving string bodies untouched.
fn strip_comments(s: &str) -> String {
    let bytes = s.as_bytes();
    let n = bytes.len();
    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;
    let mut in_str: Option<u8> = None;
    let mut escape = false;

    while i < n {
        let b = bytes[i];
        if let Some(q) = in_str {
            let ch = s[i..].chars().next().unwrap();
            out.push(ch);
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == q {
                in_str = None;
            }
            i += ch.len_utf8();
            continue;
        }

        match b {
            b'"' | b'\'' => {
                in_str = Some(b);
                out.push(b as char);
                i += 1;
            }
            b'/' if i + 1 < n && bytes[i + 1] == b'/' => {
                let rest = &s[i + 2..];
                let skip = memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
                i += 2 + skip;
            }
            b'/' if i + 1 < n && bytes[i + 1] == b'*' => {
                let rest = &s[i + 2..];
                if let Some(pos) = rest.find("*/") {
                    i += 2 + pos + 2;
                } else {
                    i = n;
                }
            }
            b'#' => {
                let rest = &s[i + 1..];
                let skip = memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
                i += 1 + skip;
            }
            _ => {
                let ch = s[i..].chars().next().unwrap();
                out.push(ch);
                i += ch.len_utf8();
            }
        }
    }
    out
}

/// When the input opens with narrative text rather than `{`/`[`, skip ahead
/// to the first `{`/`[` at a safe boundary (start of string, whitespace, or
/// one of `(:,=`) and keep only the balanced structure that follows,
/// discarding trailing prose after its matching close.
fn trim_to_outermost_structure(s: &str) -> Option<String> {
    let first_non_ws = s.trim_start();
    let c0 = first_non_ws.chars().next()?;
    if c0 == '{' || c0 == '[' {
        return None;
    }

    let mut last_boundary_ok = true;
    let mut skip_pos = None;
    for (i, ch) in s.char_indices() {
        if (ch == '{' || ch == '[') && last_boundary_ok {
            skip_pos = Some(i);
            break;
        }
        last_boundary_ok = matches!(ch, ' ' | '\t' | '\n' | '\r' | '(' | ':' | ',' | '=');
    }
    let start = skip_pos?;
    let rest = &s[start..];

    let opener = rest.as_bytes()[0];
    let closer = if opener == b'{' { b'}' } else { b']' };
    let mut depth = 0i32;
    let mut in_str: Option<u8> = None;
    let mut escape = false;
    let bytes = rest.as_bytes();
    let mut end = rest.len();
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = in_str {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == q {
                in_str = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' => in_str = Some(b),
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 && b == closer {
                    end = i + 1;
                    break;
                }
            }
            _ => {}
        }
        i += 1;
    }
    Some(rest[..end].to_string())
}

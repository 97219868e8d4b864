use crate::action::{RepairAction, RepairContext, Stage as StageKind};
use crate::classify;
use crate::error::RepairError;
use crate::stage::{Stage, StageOutcome};

/// L3: the context-aware scanner. By the time text reaches here, L2 has
/// already balanced delimiters; this stage decides what the *content*
/// between them means — which bare words are keys, which are values, which
/// quote characters open strings, and where commas/colons are missing.
///
/// Runs as two passes: a hardcoded pre-pass for patterns cheap enough to fix
/// with a straight text scan (quote-character mapping, doubled-quote
/// collapsing, thousands separators), then the main expectation-driven scan.
pub struct SyntaxNormalization;

impl Stage for SyntaxNormalization {
    fn name(&self) -> &'static str {
        StageKind::SyntaxNormalization.name()
    }

    fn priority(&self) -> u8 {
        30
    }

    fn supports(&self, _input: &str) -> bool {
        true
    }

    fn process(&self, input: String, ctx: &mut RepairContext) -> Result<StageOutcome, RepairError> {
        let scanned = scan(&input, ctx)?;
        Ok(StageOutcome::Continue(scanned))
    }
}

/// Runs the hardcoded pattern pass on its own. The orchestrator calls this
/// directly between L1 and L2 (`spec.md`'s pipeline order places this pass
/// before structural repair even though it's logically part of L3); the
/// `Stage` impl above only performs the main expectation-driven scan.
pub(crate) fn run_pre_pass(s: &str, ctx: &mut RepairContext) -> String {
    if ctx.options.enable_early_hardcoded_patterns {
        hardcoded_pre_pass(s, ctx)
    } else {
        s.to_string()
    }
}

/// Map curly/angle/guillemet quotes to `"`, curly/backtick/acute quotes to
/// `'`, collapse a doubled delimiter quote (`""` inside a `"`-string) to an
/// escaped quote, and strip thousands separators from digit runs that look
/// like `1,234,567` rather than array elements.
fn hardcoded_pre_pass(s: &str, ctx: &mut RepairContext) -> String {
    let mut out = String::with_capacity(s.len());
    let mut changed = false;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if classify::is_normalizable_double_quote(ch) {
            out.push('"');
            changed |= ch != '"';
            continue;
        }
        if classify::is_single_quote_like(ch) && ch != '\'' {
            out.push('\'');
            changed = true;
            continue;
        }
        out.push(ch);
    }
    let mut s2 = if changed { out } else { s.to_string() };

    let doubled = collapse_doubled_quotes(&s2);
    if doubled != s2 {
        changed = true;
        s2 = doubled;
    }

    let stripped = strip_thousands_separators(&s2);
    if stripped != s2 {
        changed = true;
        s2 = stripped;
    }

    if changed {
        ctx.record(RepairAction::new(StageKind::SyntaxNormalization, "applied hardcoded quote/number pattern fixes"));
    }
    s2
}

/// Collapses `""` that appears between two other string-body characters
/// (not at open/close boundary) into `\"`, the shape produced when a
/// generator escapes a quote by doubling it rather than backslashing it.
fn collapse_doubled_quotes(s: &str) -> String {
    let bytes = s.as_bytes();
    let n = bytes.len();
    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;
    let mut in_str = false;
    let mut escape = false;
    while i < n {
        let ch = s[i..].chars().next().unwrap();
        let l = ch.len_utf8();
        if in_str {
            if escape {
                out.push(ch);
                escape = false;
                i += l;
                continue;
            }
            if ch == '\\' {
                out.push(ch);
                escape = true;
                i += l;
                continue;
            }
            if ch == '"' {
                if i + 1 < n && bytes[i + 1] == b'"' {
                    out.push_str("\\\"");
                    i += 2;
                    continue;
                }
                in_str = false;
                out.push(ch);
                i += l;
                continue;
            }
            out.push(ch);
            i += l;
            continue;
        }
        if ch == '"' {
            in_str = true;
        }
        out.push(ch);
        i += l;
    }
    out
}

/// Strips `,` thousands separators from a digit run like `12,345,678` that
/// appears outside any string literal.
fn strip_thousands_separators(s: &str) -> String {
    let bytes = s.as_bytes();
    let n = bytes.len();
    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;
    let mut in_str: Option<char> = None;
    let mut escape = false;

    while i < n {
        let ch = s[i..].chars().next().unwrap();
        let l = ch.len_utf8();
        if let Some(q) = in_str {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == q {
                in_str = None;
            }
            i += l;
            continue;
        }
        if ch == '"' || ch == '\'' {
            in_str = Some(ch);
            out.push(ch);
            i += l;
            continue;
        }
        if ch.is_ascii_digit() {
            let start = i;
            let mut j = i;
            while j < n && (bytes[j] as char).is_ascii_digit() {
                j += 1;
            }
            // Anchored like `/^-?\d{1,3}(,\d{3})+.../`: only a 1-3 digit
            // leading group may start a grouped run, so `1234,567` is left
            // untouched instead of being folded into `1234567`.
            let leading_len = j - start;
            let mut looks_grouped = false;
            if (1..=3).contains(&leading_len) {
                loop {
                    if j + 3 < n && bytes[j] == b',' && bytes[j + 1..j + 4].iter().all(u8::is_ascii_digit) {
                        let after = j + 4;
                        if after >= n || !(bytes[after] as char).is_ascii_digit() {
                            looks_grouped = true;
                            j += 1;
                            while j < n && (bytes[j] as char).is_ascii_digit() {
                                j += 1;
                            }
                            continue;
                        }
                    }
                    break;
                }
            }
            let run = &s[start..j];
            if looks_grouped {
                out.push_str(&run.replace(',', ""));
            } else {
                out.push_str(run);
            }
            i = j;
            continue;
        }
        out.push(ch);
        i += l;
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Ctx {
    Top,
    ObjKey,
    ObjColon,
    ObjValue,
    ObjComma,
    ArrValue,
    ArrComma,
}

fn scan(s: &str, ctx: &mut RepairContext) -> Result<String, RepairError> {
    let mut out = String::with_capacity(s.len() + 8);
    // Completed top-level values when more than one root is found here. This
    // is a last line of defense: `MultipleJsonDetector` should already have
    // aggregated multi-value input before L3 ever sees it, but if it didn't
    // (aggregation disabled, or some other path fed a multi-root string to
    // this scanner directly) a finished top-level value must never cause the
    // rest of the input to be silently dropped.
    let mut roots: Vec<String> = Vec::new();
    let mut stack: Vec<Ctx> = vec![Ctx::Top];
    let mut rest = s;
    let mut repairs = 0usize;
    let mut top_done = false;

    loop {
        skip_ws(&mut rest);

        if rest.is_empty() {
            break;
        }
        if top_done && stack.len() == 1 {
            roots.push(std::mem::take(&mut out));
            stack = vec![Ctx::Top];
            top_done = false;
            continue;
        }
        let state = *stack.last().unwrap();
        let c = rest.chars().next().unwrap();

        match state {
            Ctx::Top => {
                emit_value(&mut rest, &mut out, &mut stack, &mut repairs)?;
                if stack.len() == 1 {
                    top_done = true;
                }
            }
            Ctx::ObjKey => {
                if c == '}' {
                    rest = &rest[1..];
                    out.push('}');
                    stack.pop();
                    *stack.last_mut().unwrap() = after_value(*stack.last().unwrap());
                    if stack.len() == 1 {
                        top_done = true;
                    }
                    continue;
                }
                emit_key(&mut rest, &mut out, &mut repairs)?;
                *stack.last_mut().unwrap() = Ctx::ObjColon;
            }
            Ctx::ObjColon => {
                if c == ':' {
                    rest = &rest[1..];
                } else {
                    repairs += 1;
                }
                out.push(':');
                skip_ws(&mut rest);
                *stack.last_mut().unwrap() = Ctx::ObjValue;
            }
            Ctx::ObjValue => {
                emit_value(&mut rest, &mut out, &mut stack, &mut repairs)?;
            }
            Ctx::ObjComma => {
                if c == '}' {
                    rest = &rest[1..];
                    out.push('}');
                    stack.pop();
                    *stack.last_mut().unwrap() = after_value(*stack.last().unwrap());
                    if stack.len() == 1 {
                        top_done = true;
                    }
                    continue;
                }
                if c == ',' {
                    rest = &rest[1..];
                    skip_ws(&mut rest);
                    if rest.starts_with('}') {
                        // trailing comma before close: drop it
                        repairs += 1;
                        continue;
                    }
                    out.push(',');
                    *stack.last_mut().unwrap() = Ctx::ObjKey;
                } else {
                    // missing comma
                    repairs += 1;
                    out.push(',');
                    *stack.last_mut().unwrap() = Ctx::ObjKey;
                }
            }
            Ctx::ArrValue => {
                if c == ']' {
                    rest = &rest[1..];
                    out.push(']');
                    stack.pop();
                    *stack.last_mut().unwrap() = after_value(*stack.last().unwrap());
                    if stack.len() == 1 {
                        top_done = true;
                    }
                    continue;
                }
                emit_value(&mut rest, &mut out, &mut stack, &mut repairs)?;
            }
            Ctx::ArrComma => {
                if c == ']' {
                    rest = &rest[1..];
                    out.push(']');
                    stack.pop();
                    *stack.last_mut().unwrap() = after_value(*stack.last().unwrap());
                    if stack.len() == 1 {
                        top_done = true;
                    }
                    continue;
                }
                if c == ',' {
                    rest = &rest[1..];
                    skip_ws(&mut rest);
                    if rest.starts_with(']') {
                        repairs += 1;
                        continue;
                    }
                    out.push(',');
                    *stack.last_mut().unwrap() = Ctx::ArrValue;
                } else {
                    repairs += 1;
                    out.push(',');
                    *stack.last_mut().unwrap() = Ctx::ArrValue;
                }
            }
        }
    }

    if !roots.is_empty() {
        roots.push(out);
        ctx.record(RepairAction::new(
            StageKind::SyntaxNormalization,
            format!("aggregated {} concatenated top-level values into an array", roots.len()),
        ));
        out = format!("[{}]", roots.join(","));
    }

    if repairs > 0 {
        ctx.record(RepairAction::new(StageKind::SyntaxNormalization, format!("normalized {repairs} syntax issue(s)")));
    }
    Ok(out)
}

fn after_value(state: Ctx) -> Ctx {
    match state {
        Ctx::Top => Ctx::Top,
        Ctx::ObjKey | Ctx::ObjColon | Ctx::ObjValue | Ctx::ObjComma => Ctx::ObjComma,
        Ctx::ArrValue | Ctx::ArrComma => Ctx::ArrComma,
    }
}

fn emit_value(
    rest: &mut &str,
    out: &mut String,
    stack: &mut Vec<Ctx>,
    repairs: &mut usize,
) -> Result<(), RepairError> {
    skip_ws(rest);
    if rest.is_empty() {
        out.push_str("null");
        let top = *stack.last().unwrap();
        *stack.last_mut().unwrap() = after_value(top);
        return Ok(());
    }
    let c = rest.chars().next().unwrap();
    match c {
        '{' => {
            *rest = &rest[1..];
            out.push('{');
            stack.push(Ctx::ObjKey);
        }
        '[' => {
            *rest = &rest[1..];
            out.push('[');
            stack.push(Ctx::ArrValue);
        }
        '"' | '\'' => {
            if c != '"' {
                *repairs += 1;
            }
            let lit = take_quoted(rest);
            emit_quoted(out, &lit);
            let top = *stack.last().unwrap();
            *stack.last_mut().unwrap() = after_value(top);
        }
        c if c == '-' || c == '.' || c.is_ascii_digit() => {
            let tok = take_number_like(rest).to_string();
            if is_valid_number(&tok) {
                out.push_str(&tok);
            } else {
                *repairs += 1;
                emit_quoted_plain(out, &tok);
            }
            let top = *stack.last().unwrap();
            *stack.last_mut().unwrap() = after_value(top);
        }
        _ => {
            let (word, _) = take_ident(rest);
            if word.is_empty() {
                // stray delimiter where a value was expected
                out.push_str("null");
                *rest = &rest[c.len_utf8()..];
            } else {
                *rest = &rest[word.len()..];
                match word {
                    "true" | "false" | "null" => out.push_str(word),
                    "True" => {
                        out.push_str("true");
                        *repairs += 1;
                    }
                    "False" => {
                        out.push_str("false");
                        *repairs += 1;
                    }
                    "None" => {
                        out.push_str("null");
                        *repairs += 1;
                    }
                    "NaN" | "Infinity" | "-Infinity" | "undefined" => {
                        out.push_str("null");
                        *repairs += 1;
                    }
                    _ => {
                        let mut joined = word.to_string();
                        loop {
                            let before = *rest;
                            skip_inline_ws(rest);
                            if rest.is_empty() {
                                break;
                            }
                            let nc = rest.as_bytes()[0];
                            if matches!(nc, b',' | b'}' | b']' | b':' | b'\n' | b'\r' | b'"' | b'\'' | b'[' | b'{') {
                                *rest = before;
                                break;
                            }
                            let (next_word, _) = take_ident(rest);
                            if next_word.is_empty() {
                                *rest = before;
                                break;
                            }
                            *rest = &rest[next_word.len()..];
                            joined.push(' ');
                            joined.push_str(next_word);
                        }
                        *repairs += 1;
                        emit_quoted_plain(out, &joined);
                    }
                }
            }
            let top = *stack.last().unwrap();
            *stack.last_mut().unwrap() = after_value(top);
        }
    }
    Ok(())
}

fn emit_key(rest: &mut &str, out: &mut String, repairs: &mut usize) -> Result<(), RepairError> {
    skip_ws(rest);
    let c = match rest.chars().next() {
        Some(c) => c,
        None => {
            out.push_str("\"\"");
            return Ok(());
        }
    };
    if c == '"' || c == '\'' {
        if c != '"' {
            *repairs += 1;
        }
        let lit = take_quoted(rest);
        emit_quoted(out, &lit);
        return Ok(());
    }
    let (word, _) = take_ident(rest);
    if !word.is_empty() {
        *rest = &rest[word.len()..];
        *repairs += 1;
        emit_quoted_plain(out, word);
        return Ok(());
    }
    // punctuation-only key fragment: take until a clear delimiter
    let tok = take_until_delim(rest, &[':', ',', '}']);
    *repairs += 1;
    emit_quoted_plain(out, tok.trim());
    Ok(())
}

fn skip_ws(s: &mut &str) {
    *s = s.trim_start_matches([' ', '\t', '\n', '\r']);
}

fn skip_inline_ws(s: &mut &str) {
    *s = s.trim_start_matches([' ', '\t']);
}

fn take_ident<'a>(s: &'a str) -> (&'a str, &'a str) {
    let mut end = 0usize;
    for (i, ch) in s.char_indices() {
        if i == 0 {
            if !classify::is_ident_start(ch) {
                break;
            }
        } else if !classify::is_ident_continue(ch) {
            break;
        }
        end = i + ch.len_utf8();
    }
    (&s[..end], &s[end..])
}

fn take_until_delim<'a>(s: &mut &'a str, delims: &[char]) -> &'a str {
    let src = *s;
    let mut end = 0usize;
    for (i, ch) in src.char_indices() {
        if delims.contains(&ch) {
            break;
        }
        end = i + ch.len_utf8();
    }
    *s = &src[end..];
    &src[..end]
}

/// Consumes one quoted literal (single or double) and returns its decoded
/// body, leaving `s` positioned just past the closing quote.
fn take_quoted(s: &mut &str) -> String {
    let src = *s;
    let quote = src.chars().next().unwrap();
    let bytes = src.as_bytes();
    let n = bytes.len();
    let mut i = quote.len_utf8();
    let mut body = String::new();
    let mut escape = false;
    while i < n {
        let ch = src[i..].chars().next().unwrap();
        let l = ch.len_utf8();
        i += l;
        if escape {
            escape = false;
            body.push(ch);
            continue;
        }
        if ch == '\\' {
            escape = true;
            continue;
        }
        if ch == quote {
            *s = &src[i..];
            return body;
        }
        body.push(ch);
    }
    *s = &src[n..];
    body
}

fn emit_quoted(out: &mut String, body: &str) {
    out.push('"');
    for ch in body.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn emit_quoted_plain(out: &mut String, body: &str) {
    emit_quoted(out, body);
}

fn take_number_like<'a>(s: &mut &'a str) -> &'a str {
    let src = *s;
    let bytes = src.as_bytes();
    let n = bytes.len();
    let mut i = 0usize;
    if i < n && bytes[i] == b'-' {
        i += 1;
    }
    while i < n && (bytes[i] as char).is_ascii_digit() {
        i += 1;
    }
    if i < n && bytes[i] == b'.' {
        i += 1;
        while i < n && (bytes[i] as char).is_ascii_digit() {
            i += 1;
        }
    }
    if i < n && (bytes[i] == b'e' || bytes[i] == b'E') {
        let save = i;
        i += 1;
        if i < n && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let digits_start = i;
        while i < n && (bytes[i] as char).is_ascii_digit() {
            i += 1;
        }
        if i == digits_start {
            i = save;
        }
    }
    let tok = &src[..i];
    *s = &src[i..];
    tok
}

fn is_valid_number(tok: &str) -> bool {
    if tok.is_empty() || tok == "-" {
        return false;
    }
    tok.parse::<f64>().is_ok()
}

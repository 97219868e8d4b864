//! Last-resort recursive-descent parser.
//!
//! L5 only runs when L4's strict `serde_json` decode has already failed and
//! `Strictness` permits it. By the time control reaches here, L1–L3 have
//! already made their own decisions about quoting, literals, and delimiters;
//! this stage's job is to recover whatever is left, not to re-litigate what
//! the earlier stages already normalized. It mirrors the contract those
//! stages expose (`Stage::process`) but is structured as a classic
//! zero-copy `&str`-slicing recursive descent instead of a single scan pass,
//! because a fallback parser benefits from being obviously correct over
//! being fast.

mod array;
mod lex;
mod number;
mod object;
mod strings;

use crate::action::{RepairAction, RepairContext, Stage as StageKind};
use crate::emit::{Emitter, JRResult, StringEmitter};
use crate::error::{RepairError, RepairErrorKind};
use crate::stage::{Stage, StageOutcome};

use array::parse_array;
use lex::{skip_bom, skip_ws_and_comments, take_ident, take_symbol_until_delim};
use number::parse_number_token;
use object::parse_object;
use strings::{emit_json_string_from_lit, parse_string_literal_concat_fast};

pub struct TolerantParsing;

impl Stage for TolerantParsing {
    fn name(&self) -> &'static str {
        StageKind::TolerantParsing.name()
    }

    fn priority(&self) -> u8 {
        50
    }

    fn supports(&self, input: &str) -> bool {
        !input.trim().is_empty()
    }

    fn process(&self, input: String, ctx: &mut RepairContext) -> Result<StageOutcome, RepairError> {
        if ctx.options.strictness == crate::options::Strictness::Strict {
            return Err(RepairError::new(RepairErrorKind::Unrepairable, 0));
        }

        let max_depth = ctx.options.max_nesting_depth;
        let mut s: &str = &input;
        skip_bom(&mut s);
        skip_ws_and_comments(&mut s);
        if s.is_empty() {
            return Err(RepairError::new(RepairErrorKind::Unrepairable, 0));
        }

        let mut out = String::with_capacity(input.len() + 8);
        {
            let mut se = StringEmitter::new(&mut out);
            parse_root_many(&mut s, max_depth, &mut se)?;
        }

        #[cfg(feature = "serde")]
        {
            if serde_json::from_str::<serde_json::Value>(&out).is_err() {
                return Err(RepairError::new(RepairErrorKind::Unrepairable, 0));
            }
        }

        let action = match ctx.metadata(StageKind::Validation.name()) {
            Some(why) => format!("recovered value via fallback recursive descent after validation failed: {why}"),
            None => "recovered value via fallback recursive descent".to_string(),
        };
        ctx.record(RepairAction::new(StageKind::TolerantParsing, action));
        Ok(StageOutcome::Ok(out))
    }
}

fn starts_value(s: &str) -> bool {
    let s = s.trim_start();
    match s.chars().next() {
        Some('{') | Some('[') | Some('"') | Some('\'') | Some('-') => true,
        Some(c) if c.is_ascii_digit() => true,
        Some(c) if c.is_alphabetic() => true,
        _ => false,
    }
}

/// Parse one value; if a comma-separated second value follows at the root,
/// aggregate everything seen into a JSON array (the last-resort analogue of
/// the pre-stage `MultipleJsonDetector`, for input that reaches L5 still
/// holding more than one top-level value).
fn parse_root_many<E: Emitter>(input: &mut &str, max_depth: usize, out: &mut E) -> JRResult<()> {
    skip_ws_and_comments(input);
    if input.is_empty() {
        return out.emit_str("null");
    }

    let mut first = String::new();
    {
        let mut se = StringEmitter::new(&mut first);
        parse_value(input, 0, max_depth, &mut se)?;
    }

    skip_ws_and_comments(input);
    if input.starts_with(',') {
        *input = &input[1..];
        skip_ws_and_comments(input);
    }

    if !starts_value(input) {
        return out.emit_str(&first);
    }

    out.emit_char('[')?;
    out.emit_str(&first)?;
    while !input.is_empty() {
        skip_ws_and_comments(input);
        if input.is_empty() || input.starts_with(']') || input.starts_with('}') {
            break;
        }
        if !starts_value(input) {
            break;
        }
        out.emit_char(',')?;
        parse_value(input, 0, max_depth, out)?;
        skip_ws_and_comments(input);
        if input.starts_with(',') {
            *input = &input[1..];
        }
    }
    out.emit_char(']')
}

fn parse_value<E: Emitter>(input: &mut &str, depth: usize, max_depth: usize, out: &mut E) -> JRResult<()> {
    skip_ws_and_comments(input);
    if input.is_empty() {
        return Err(RepairError::new(RepairErrorKind::UnclosedString, 0));
    }
    let c = input.chars().next().unwrap();
    match c {
        '{' => parse_object(input, depth, max_depth, out),
        '[' => parse_array(input, depth, max_depth, out),
        '"' | '\'' => parse_string_literal_concat_fast(input, out),
        '/' => parse_regex_literal(input, out),
        c if c == '-' || c == '.' || c.is_ascii_digit() => parse_number_token(input, out),
        _ => parse_symbol_or_unquoted_string(input, out),
    }
}

fn parse_symbol_or_unquoted_string<E: Emitter>(input: &mut &str, out: &mut E) -> JRResult<()> {
    let s = *input;
    let (tok, rest) = take_ident(s);
    if !tok.is_empty() {
        *input = rest;
        match tok {
            "true" => return out.emit_str("true"),
            "false" => return out.emit_str("false"),
            "null" => return out.emit_str("null"),
            "True" => return out.emit_str("true"),
            "False" => return out.emit_str("false"),
            "None" => return out.emit_str("null"),
            "NaN" | "Infinity" => return out.emit_str("null"),
            "undefined" => return out.emit_str("null"),
            _ => {}
        }

        // Join adjacent bare words separated only by spaces/tabs into one
        // quoted string (e.g. `name: John Smith` -> `"John Smith"`).
        let mut emitted = String::from(tok);
        loop {
            let r0 = *input;
            let mut i = 0usize;
            while i < r0.len() {
                match r0.as_bytes()[i] {
                    b' ' | b'\t' => i += 1,
                    _ => break,
                }
            }
            *input = &r0[i..];
            if input.is_empty() {
                break;
            }
            let nc = input.as_bytes()[0];
            if matches!(nc, b',' | b'}' | b']' | b':' | b'\n' | b'\r' | b'"' | b'\'' | b'[' | b'{') {
                break;
            }
            if nc == b'/' && input.len() >= 2 {
                let n2 = input.as_bytes()[1];
                if n2 == b'/' || n2 == b'*' {
                    break;
                }
            }
            let part = take_symbol_until_delim(input);
            if part.is_empty() {
                break;
            }
            emitted.push(' ');
            emitted.push_str(part);
        }
        return emit_json_string_from_lit(out, &emitted);
    }

    let sym = take_symbol_until_delim(input);
    if sym.is_empty() {
        if let Some(ch) = s.chars().next() {
            if ch == '}' || ch == ',' || ch == ']' {
                return out.emit_str("\"\"");
            }
            *input = &s[ch.len_utf8()..];
            let mut buf = [0u8; 4];
            return emit_json_string_from_lit(out, ch.encode_utf8(&mut buf));
        }
        return out.emit_str("\"\"");
    }
    emit_json_string_from_lit(out, sym)
}

/// JS-style `/pattern/flags` regex literal appearing where a value is
/// expected: kept as a JSON string rather than rejected outright.
fn parse_regex_literal<E: Emitter>(input: &mut &str, out: &mut E) -> JRResult<()> {
    let s = *input;
    if !s.starts_with('/') {
        return emit_json_string_from_lit(out, "/");
    }
    let mut i = 1usize;
    let mut esc = false;
    while i < s.len() {
        let ch = s[i..].chars().next().unwrap();
        let l = ch.len_utf8();
        i += l;
        if esc {
            esc = false;
            continue;
        }
        if ch == '\\' {
            esc = true;
            continue;
        }
        if ch == '/' {
            let mut j = i;
            while j < s.len() {
                let ch2 = s[j..].chars().next().unwrap();
                if ch2.is_ascii_alphabetic() {
                    j += ch2.len_utf8();
                } else {
                    break;
                }
            }
            let lit = &s[..j];
            *input = &s[j..];
            return emit_json_string_from_lit(out, lit);
        }
    }
    *input = &s[s.len()..];
    emit_json_string_from_lit(out, s)
}

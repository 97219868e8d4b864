use crate::action::{RepairAction, RepairContext, Stage as StageKind};
use crate::error::RepairError;
use crate::stage::{Stage, StageOutcome};

/// Pre-stage: detects two or more concatenated top-level JSON-like values
/// (a common shape for streamed LLM output, e.g. `{"a":1}{"b":2}` or
/// `{"a":1}\n{"b":2}`) and wraps them into a single array before any other
/// stage sees the text. Runs first because every later stage assumes a
/// single top-level value.
pub struct MultipleJsonDetector;

impl Stage for MultipleJsonDetector {
    fn name(&self) -> &'static str {
        StageKind::MultipleJsonDetector.name()
    }

    fn priority(&self) -> u8 {
        0
    }

    fn supports(&self, input: &str) -> bool {
        // Detects two or more concatenated top-level values regardless of
        // whether they're objects/arrays or bare scalars/strings — the
        // leading token type must not gate this, or scalar siblings like
        // `1 2 3` would reach later stages as a single stray value.
        split_top_level_values(input).len() >= 2
    }

    fn process(&self, input: String, ctx: &mut RepairContext) -> Result<StageOutcome, RepairError> {
        if !ctx.options.enable_multiple_json_aggregation {
            return Ok(StageOutcome::Continue(input));
        }

        let segments = split_top_level_values(&input);
        if segments.len() < 2 {
            return Ok(StageOutcome::Continue(input));
        }

        let mut out = String::with_capacity(input.len() + segments.len() + 2);
        out.push('[');
        for (i, seg) in segments.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(seg);
        }
        out.push(']');

        ctx.record(
            RepairAction::new(
                StageKind::MultipleJsonDetector,
                format!("aggregated {} concatenated top-level values into an array", segments.len()),
            )
            .at(0),
        );
        Ok(StageOutcome::Continue(out))
    }
}

/// Split `s` into its top-level value substrings, tracking brace/bracket
/// depth and string state so commas or braces inside strings never count as
/// boundaries. Whitespace and a single separating comma between values are
/// dropped; everything else is preserved verbatim for later stages to repair.
fn split_top_level_values(s: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let bytes = s.as_bytes();
    let mut i = 0usize;
    let n = bytes.len();

    loop {
        while i < n && (bytes[i] as char).is_whitespace() {
            i += 1;
        }
        if i >= n {
            break;
        }
        if bytes[i] == b',' {
            i += 1;
            continue;
        }

        let start = i;
        let opener = bytes[i];
        if opener == b'{' || opener == b'[' {
            let closer = if opener == b'{' { b'}' } else { b']' };
            let mut depth = 0i32;
            let mut in_str: Option<u8> = None;
            let mut escape = false;
            while i < n {
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
                            i += 1;
                            break;
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            segments.push(&s[start..i]);
        } else {
            // Scalar/string value at the top level: runs until whitespace or
            // a top-level comma, respecting quotes.
            let mut in_str: Option<u8> = None;
            let mut escape = false;
            while i < n {
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
                    b'"' | b'\'' => {
                        in_str = Some(b);
                        i += 1;
                    }
                    b',' => break,
                    _ if (b as char).is_whitespace() => break,
                    _ => i += 1,
                }
            }
            segments.push(&s[start..i]);
        }
    }

    segments
}

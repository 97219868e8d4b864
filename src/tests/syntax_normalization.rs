use crate::action::RepairContext;
use crate::options::Options;
use crate::stage::{Stage, StageOutcome};
use crate::stages::{run_pre_pass, SyntaxNormalization};

fn run(input: &str) -> (String, RepairContext) {
    let mut ctx = RepairContext::new(Options::default());
    let pre = run_pre_pass(input, &mut ctx);
    let out = SyntaxNormalization.process(pre, &mut ctx).unwrap();
    match out {
        StageOutcome::Ok(s) | StageOutcome::Continue(s) => (s, ctx),
    }
}

#[test]
fn quotes_bare_keys() {
    let (out, ctx) = run(r#"{name: "Alice", age: 30}"#);
    assert_eq!(out, r#"{"name":"Alice","age":30}"#);
    assert!(ctx.total_repairs() > 0);
}

#[test]
fn requotes_single_quoted_strings_as_double() {
    let (out, ctx) = run(r#"{'name': 'Alice'}"#);
    assert_eq!(out, r#"{"name":"Alice"}"#);
    // one for the key, one for the value
    assert_eq!(ctx.total_repairs(), 2);
}

#[test]
fn maps_python_literals() {
    let (out, ctx) = run(r#"{"active": True, "missing": None, "flag": False}"#);
    assert_eq!(out, r#"{"active":true,"missing":null,"flag":false}"#);
    assert_eq!(ctx.total_repairs(), 3);
}

#[test]
fn inserts_missing_comma_between_fields() {
    let (out, _ctx) = run(r#"{"a":1 "b":2}"#);
    assert_eq!(out, r#"{"a":1,"b":2}"#);
}

#[test]
fn inserts_missing_colon() {
    let (out, _ctx) = run(r#"{"a" 1}"#);
    assert_eq!(out, r#"{"a":1}"#);
}

#[test]
fn drops_trailing_comma_in_array() {
    let (out, ctx) = run("[1,2,3,]");
    assert_eq!(out, "[1,2,3]");
    assert_eq!(ctx.total_repairs(), 1);
}

#[test]
fn drops_trailing_comma_in_object() {
    let (out, _ctx) = run(r#"{"a":1,}"#);
    assert_eq!(out, r#"{"a":1}"#);
}

#[test]
fn joins_multi_word_bare_value() {
    let (out, _ctx) = run(r#"{"name": Weiss Savage}"#);
    assert_eq!(out, r#"{"name":"Weiss Savage"}"#);
}

#[test]
fn string_body_is_untouched() {
    let (out, ctx) = run(r#"{"message":"Set active to True, use None"}"#);
    assert_eq!(out, r#"{"message":"Set active to True, use None"}"#);
    assert_eq!(ctx.total_repairs(), 0);
}

#[test]
fn collapses_doubled_quotes_in_pre_pass() {
    let mut ctx = RepairContext::new(Options::default());
    let pre = run_pre_pass(r#"{"a":"say ""hi"""}"#, &mut ctx);
    assert_eq!(pre, r#"{"a":"say \"hi\""}"#);
}

#[test]
fn strips_thousands_separators_in_pre_pass() {
    let mut ctx = RepairContext::new(Options::default());
    let pre = run_pre_pass(r#"{"n":1,234,567}"#, &mut ctx);
    assert_eq!(pre, r#"{"n":1234567}"#);
}

#[test]
fn hardcoded_pre_pass_can_be_disabled() {
    let mut opts = Options::default();
    opts.enable_early_hardcoded_patterns = false;
    let mut ctx = RepairContext::new(opts);
    let pre = run_pre_pass(r#"{"n":1,234}"#, &mut ctx);
    assert_eq!(pre, r#"{"n":1,234}"#);
}

#[test]
fn thousands_separator_requires_a_one_to_three_digit_leading_group() {
    let mut ctx = RepairContext::new(Options::default());
    // 4 leading digits before the first comma: not a grouped number per the
    // anchored `/^-?\d{1,3}(,\d{3})+.../` pattern, so it must be left alone.
    let pre = run_pre_pass("1234,567", &mut ctx);
    assert_eq!(pre, "1234,567");
}

#[test]
fn scanner_never_silently_truncates_a_second_top_level_scalar() {
    // Defense in depth: even if the detector upstream is bypassed, the
    // scanner itself must not drop content after the first completed value.
    let (out, _ctx) = run("1 2 3");
    assert_eq!(out, "[1,2,3]");
}

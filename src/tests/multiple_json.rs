use crate::action::RepairContext;
use crate::options::Options;
use crate::stage::{Stage, StageOutcome};
use crate::stages::MultipleJsonDetector;

fn run(input: &str, opts: Options) -> (String, RepairContext) {
    let mut ctx = RepairContext::new(opts);
    let out = MultipleJsonDetector
        .process(input.to_string(), &mut ctx)
        .unwrap();
    match out {
        StageOutcome::Ok(s) | StageOutcome::Continue(s) => (s, ctx),
    }
}

#[test]
fn aggregates_concatenated_objects() {
    let (out, ctx) = run(r#"{"a":1}{"b":2}"#, Options::default());
    assert_eq!(out, r#"[{"a":1},{"b":2}]"#);
    assert_eq!(ctx.total_repairs(), 1);
}

#[test]
fn aggregates_newline_separated_ndjson() {
    let (out, _ctx) = run("{\"a\":1}\n{\"b\":2}\n{\"c\":3}", Options::default());
    assert_eq!(out, r#"[{"a":1},{"b":2},{"c":3}]"#);
}

#[test]
fn leaves_single_value_alone() {
    let (out, ctx) = run(r#"{"a":1}"#, Options::default());
    assert_eq!(out, r#"{"a":1}"#);
    assert_eq!(ctx.total_repairs(), 0);
}

#[test]
fn disabled_via_option() {
    let mut opts = Options::default();
    opts.enable_multiple_json_aggregation = false;
    let (out, ctx) = run(r#"{"a":1}{"b":2}"#, opts);
    assert_eq!(out, r#"{"a":1}{"b":2}"#);
    assert_eq!(ctx.total_repairs(), 0);
}

#[test]
fn commas_inside_strings_are_not_split_points() {
    let (out, _ctx) = run(r#"{"a":"x,y"}{"b":2}"#, Options::default());
    assert_eq!(out, r#"[{"a":"x,y"},{"b":2}]"#);
}

#[test]
fn supports_detects_concatenated_scalars_not_just_objects_or_arrays() {
    assert!(MultipleJsonDetector.supports("1 2 3"));
    assert!(MultipleJsonDetector.supports("\"a\"\n\"b\""));
    assert!(!MultipleJsonDetector.supports("1"));
    assert!(!MultipleJsonDetector.supports(r#"{"a":1}"#));
}

#[test]
fn aggregates_concatenated_top_level_scalars() {
    let (out, ctx) = run("1 2 3", Options::default());
    assert_eq!(out, "[1,2,3]");
    assert_eq!(ctx.total_repairs(), 1);
}

#[test]
fn aggregates_concatenated_top_level_strings() {
    let (out, _ctx) = run("\"a\"\n\"b\"", Options::default());
    assert_eq!(out, r#"["a","b"]"#);
}

#[test]
fn full_pipeline_does_not_truncate_concatenated_scalars() {
    // Regression: when the detector's `supports()` only matched a leading
    // `{`/`[`, this silently dropped everything after the first scalar.
    let out = crate::repair_to_string(b"1 2 3", &Options::default()).unwrap();
    assert_eq!(out, "[1,2,3]");
}

use crate::action::RepairContext;
use crate::options::{Options, Strictness};
use crate::stage::{Stage, StageOutcome};
use crate::stages::TolerantParsing;

fn run(input: &str, opts: Options) -> Result<String, crate::error::RepairError> {
    let mut ctx = RepairContext::new(opts);
    TolerantParsing.process(input.to_string(), &mut ctx).map(|out| match out {
        StageOutcome::Ok(s) | StageOutcome::Continue(s) => s,
    })
}

#[test]
fn strict_mode_refuses_to_run() {
    let mut opts = Options::default();
    opts.strictness = Strictness::Strict;
    let err = run("{\"a\":1}", opts).unwrap_err();
    assert_eq!(err.kind, crate::error::RepairErrorKind::Unrepairable);
}

#[test]
fn recovers_a_well_formed_object() {
    let out = run(r#"{"a":1,"b":[1,2,3]}"#, Options::default()).unwrap();
    assert_eq!(out, r#"{"a":1,"b":[1,2,3]}"#);
}

#[test]
fn recovers_single_quoted_object() {
    let out = run("{'a': 'x'}", Options::default()).unwrap();
    assert_eq!(out, r#"{"a":"x"}"#);
}

#[test]
fn treats_js_regex_literal_as_a_quoted_string() {
    let out = run(r#"{"pattern": /abc+/g}"#, Options::default()).unwrap();
    assert_eq!(out, r#"{"pattern":"/abc+/g"}"#);
}

#[test]
fn aggregates_comma_separated_root_values_into_an_array() {
    let out = run(r#"{"a":1}, {"b":2}"#, Options::default()).unwrap();
    assert_eq!(out, r#"[{"a":1},{"b":2}]"#);
}

#[test]
fn maps_python_keywords_at_top_level() {
    let out = run("True", Options::default()).unwrap();
    assert_eq!(out, "true");
}

#[test]
fn empty_input_is_unrepairable() {
    let err = run("   ", Options::default()).unwrap_err();
    assert_eq!(err.kind, crate::error::RepairErrorKind::Unrepairable);
}

#[test]
fn folds_validation_failure_reason_into_its_own_action() {
    let mut opts = Options::default();
    opts.logging = true;
    let mut ctx = RepairContext::new(opts);
    ctx.set_metadata(crate::action::Stage::Validation.name(), "expected value at line 1 column 1");
    let out = TolerantParsing.process("{'a': 'x'}".to_string(), &mut ctx).unwrap();
    match out {
        StageOutcome::Ok(s) => assert_eq!(s, r#"{"a":"x"}"#),
        StageOutcome::Continue(_) => panic!("expected Ok"),
    }
    let actions = ctx.into_actions();
    let action = actions.iter().find(|a| a.stage == crate::action::Stage::TolerantParsing).unwrap();
    assert!(action.action.contains("expected value at line 1 column 1"));
}

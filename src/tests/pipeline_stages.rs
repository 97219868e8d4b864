use crate::{repair_to_string, repair_with_debug, Options, Strictness};

#[test]
fn fast_path_skips_every_stage_for_already_valid_json() {
    let (_outcome, debug) = repair_with_debug(br#"{"a":1}"#, &Options::default()).unwrap();
    assert!(debug.steps.is_empty());
    assert!(!debug.used_tolerant_parsing);
    assert_eq!(debug.total_repairs, 0);
}

#[test]
fn disabling_fast_path_still_runs_validation_and_reports_it() {
    let mut opts = Options::default();
    opts.fast_path_optimization = false;
    let (_outcome, debug) = repair_with_debug(br#"{"a":1}"#, &opts).unwrap();
    assert!(debug.steps.iter().any(|s| s.stage == "validation"));
    assert!(!debug.used_tolerant_parsing);
}

#[test]
fn stages_run_in_documented_order() {
    let mut opts = Options::default();
    opts.fast_path_optimization = false;
    let (_outcome, debug) = repair_with_debug(br#"{name: 'Alice', age: 30,}"#, &opts).unwrap();
    let names: Vec<&str> = debug.steps.iter().map(|s| s.stage).collect();
    let expected_order = [
        "content-cleaning",
        "structural-repair",
        "syntax-normalization",
        "validation",
    ];
    let mut last = 0usize;
    for expect in expected_order {
        let pos = names.iter().position(|n| *n == expect).unwrap_or_else(|| {
            panic!("stage {expect} did not run; ran {names:?}")
        });
        assert!(pos >= last, "stage {expect} ran out of order: {names:?}");
        last = pos;
    }
}

#[test]
fn nesting_depth_errors_are_hard_failures_regardless_of_strictness() {
    // A nesting-depth violation is raised by L2 itself and short-circuits the
    // whole pipeline; `Strictness` only governs whether L5 gets a turn after
    // L4 fails, so it has no bearing on this kind of hard failure.
    for strictness in [Strictness::Strict, Strictness::Lenient, Strictness::Permissive] {
        let mut opts = Options::default();
        opts.strictness = strictness;
        opts.max_nesting_depth = 2;
        // Fast-path would decode this valid JSON before any stage (and its
        // nesting check) runs, so disable it to force the stage to run.
        opts.fast_path_optimization = false;
        let err = repair_to_string(b"[[[1]]]", &opts).unwrap_err();
        assert_eq!(err.kind, crate::error::RepairErrorKind::NestingDepthExceeded);
    }
}

#[test]
fn early_exit_stops_after_first_ok() {
    let mut opts = Options::default();
    opts.fast_path_optimization = false;
    opts.early_exit = true;
    let (_outcome, debug) = repair_with_debug(br#"{"a":1}"#, &opts).unwrap();
    // content-cleaning and structural-repair both report `Continue`, not `Ok`,
    // so only validation (the first stage to report `Ok`) should be terminal.
    assert_eq!(debug.steps.last().unwrap().stage, "validation");
}

#[test]
fn logging_disabled_by_default_omits_action_list() {
    let outcome = crate::repair(br#"{name: 'Alice'}"#, &Options::default()).unwrap();
    assert!(outcome.actions.is_none());
}

#[test]
fn logging_enabled_returns_action_list() {
    let mut opts = Options::default();
    opts.logging = true;
    let outcome = crate::repair(br#"{name: 'Alice'}"#, &opts).unwrap();
    assert!(outcome.actions.is_some());
    assert!(!outcome.actions.unwrap().is_empty());
}

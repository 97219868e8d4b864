//! The orchestrator: owns stage order, the size/timeout/UTF-8 checks that
//! run before any stage, and the decision of when to stop early.

use std::time::Instant;

use crate::action::{RepairAction, RepairContext, Stage as StageKind};
use crate::error::{RepairError, RepairErrorKind};
use crate::options::{Options, Strictness};
use crate::stage::{Stage, StageOutcome};
use crate::stages;

/// The result of a successful repair: the parsed value, and (when
/// `Options::logging` was set) the full action log.
#[cfg(feature = "serde")]
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub value: serde_json::Value,
    pub actions: Option<Vec<RepairAction>>,
    /// Set when L5 (the last-resort recursive descent) produced the final
    /// value, i.e. L1–L4 alone could not validate the input.
    pub used_tolerant_parsing: bool,
}

fn check_size(input: &[u8], opts: &Options) -> Result<(), RepairError> {
    let limit = opts.max_size_mb.saturating_mul(1024 * 1024);
    if (input.len() as u64) > limit {
        return Err(RepairError::new(RepairErrorKind::InputTooLarge, 0));
    }
    Ok(())
}

fn check_timeout(start: Instant, opts: &Options) -> Result<(), RepairError> {
    if start.elapsed().as_millis() as u64 > opts.timeout_ms {
        return Err(RepairError::new(RepairErrorKind::Timeout, 0));
    }
    Ok(())
}

/// Decode `input` as UTF-8, replacing invalid sequences with U+FFFD and
/// recording the replacement as a content-cleaning action (L1 operation:
/// UTF-8 validation and replacement happens before any stage runs, since
/// every later stage assumes well-formed `&str` input).
fn decode_utf8_lossy(input: &[u8], ctx: &mut RepairContext) -> String {
    let decoded = String::from_utf8_lossy(input);
    if let std::borrow::Cow::Owned(_) = &decoded {
        ctx.record(RepairAction::new(
            StageKind::ContentCleaning,
            "replaced invalid UTF-8 byte sequence(s) with U+FFFD",
        ));
    }
    decoded.into_owned()
}

/// One recorded step, used by [`crate::debug::DebugInfo`].
pub(crate) struct StepRecord {
    pub stage: &'static str,
    pub elapsed_micros: u128,
    pub repairs_after: usize,
}

pub(crate) struct RunResult {
    pub text: String,
    pub ctx: RepairContext,
    pub steps: Vec<StepRecord>,
    pub used_tolerant_parsing: bool,
}

/// Runs the full eight-step pipeline from `SPEC_FULL.md` §2 and returns the
/// repaired JSON text plus the context carrying the action log.
pub(crate) fn run(input: &[u8], opts: &Options) -> Result<RunResult, RepairError> {
    check_size(input, opts)?;
    let start = Instant::now();
    let mut ctx = RepairContext::new(opts.clone());
    let mut steps = Vec::new();
    let mut used_tolerant_parsing = false;

    let mut text = decode_utf8_lossy(input, &mut ctx);

    if opts.fast_path_optimization {
        #[cfg(feature = "serde")]
        {
            if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
                return Ok(RunResult { text, ctx, steps, used_tolerant_parsing });
            }
        }
    }

    macro_rules! run_stage {
        ($stage:expr) => {{
            check_timeout(start, &ctx.options)?;
            let stage = $stage;
            if stage.supports(&text) {
                let step_start = Instant::now();
                let early_exit = ctx.options.early_exit;
                match stage.process(text, &mut ctx)? {
                    StageOutcome::Ok(out) => {
                        text = out;
                        steps.push(StepRecord {
                            stage: stage.name(),
                            elapsed_micros: step_start.elapsed().as_micros(),
                            repairs_after: ctx.total_repairs(),
                        });
                        if early_exit {
                            return Ok(RunResult { text, ctx, steps, used_tolerant_parsing });
                        }
                    }
                    StageOutcome::Continue(out) => {
                        text = out;
                        steps.push(StepRecord {
                            stage: stage.name(),
                            elapsed_micros: step_start.elapsed().as_micros(),
                            repairs_after: ctx.total_repairs(),
                        });
                    }
                }
            }
        }};
    }

    run_stage!(stages::MultipleJsonDetector);
    run_stage!(stages::ContentCleaning);

    check_timeout(start, &ctx.options)?;
    text = stages::run_pre_pass(&text, &mut ctx);

    run_stage!(stages::StructuralRepair);
    run_stage!(stages::SyntaxNormalization);

    // L4 is always terminal on success regardless of `early_exit`: once the
    // text decodes as valid JSON there is nothing left for L5 to recover.
    check_timeout(start, &ctx.options)?;
    {
        let stage = stages::Validation;
        let step_start = Instant::now();
        if let StageOutcome::Ok(out) = stage.process(text.clone(), &mut ctx)? {
            text = out;
            steps.push(StepRecord {
                stage: stage.name(),
                elapsed_micros: step_start.elapsed().as_micros(),
                repairs_after: ctx.total_repairs(),
            });
            return Ok(RunResult { text, ctx, steps, used_tolerant_parsing });
        }
        steps.push(StepRecord {
            stage: stage.name(),
            elapsed_micros: step_start.elapsed().as_micros(),
            repairs_after: ctx.total_repairs(),
        });
    }

    if opts.strictness != Strictness::Strict {
        check_timeout(start, &ctx.options)?;
        let stage = stages::TolerantParsing;
        let step_start = Instant::now();
        let out = stage.process(text, &mut ctx)?;
        used_tolerant_parsing = true;
        let text = match out {
            StageOutcome::Ok(s) | StageOutcome::Continue(s) => s,
        };
        steps.push(StepRecord {
            stage: stage.name(),
            elapsed_micros: step_start.elapsed().as_micros(),
            repairs_after: ctx.total_repairs(),
        });
        return Ok(RunResult { text, ctx, steps, used_tolerant_parsing });
    }

    Err(RepairError::new(RepairErrorKind::Unrepairable, 0))
}

pub fn repair_to_string(input: &[u8], opts: &Options) -> Result<String, RepairError> {
    Ok(run(input, opts)?.text)
}

#[cfg(feature = "serde")]
pub fn repair(input: &[u8], opts: &Options) -> Result<RepairOutcome, RepairError> {
    let result = run(input, opts)?;
    let value: serde_json::Value = serde_json::from_str(&result.text)
        .map_err(|_| RepairError::new(RepairErrorKind::Unrepairable, 0))?;
    let logging = result.ctx.options.logging;
    Ok(RepairOutcome {
        value,
        actions: if logging { Some(result.ctx.into_actions()) } else { None },
        used_tolerant_parsing: result.used_tolerant_parsing,
    })
}

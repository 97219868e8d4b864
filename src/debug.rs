//! Per-stage diagnostics for [`crate::repair_with_debug`], the typed
//! equivalent of the teacher's `repair_to_string_with_log` but reporting
//! timing per stage rather than only a flat log.

use crate::error::RepairError;
use crate::options::Options;
use crate::pipeline::{self, RepairOutcome};

#[derive(Debug, Clone)]
pub struct StepInfo {
    pub stage: &'static str,
    pub elapsed_micros: u128,
    /// Running total of repair actions recorded by the time this stage
    /// finished, regardless of whether `Options::logging` kept the entries.
    pub repairs_after: usize,
}

#[derive(Debug, Clone)]
pub struct DebugInfo {
    pub steps: Vec<StepInfo>,
    pub used_tolerant_parsing: bool,
    pub total_repairs: usize,
}

pub fn repair_with_debug(input: &[u8], opts: &Options) -> Result<(RepairOutcome, DebugInfo), RepairError> {
    let result = pipeline::run(input, opts)?;
    let value: serde_json::Value = serde_json::from_str(&result.text)
        .map_err(|_| RepairError::new(crate::error::RepairErrorKind::Unrepairable, 0))?;

    let total_repairs = result.ctx.total_repairs();
    let logging = result.ctx.options.logging;
    let outcome = RepairOutcome {
        value,
        actions: if logging { Some(result.ctx.into_actions()) } else { None },
        used_tolerant_parsing: result.used_tolerant_parsing,
    };
    let debug = DebugInfo {
        steps: result
            .steps
            .into_iter()
            .map(|s| StepInfo {
                stage: s.stage,
                elapsed_micros: s.elapsed_micros,
                repairs_after: s.repairs_after,
            })
            .collect(),
        used_tolerant_parsing: outcome.used_tolerant_parsing,
        total_repairs,
    };
    Ok((outcome, debug))
}

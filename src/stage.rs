use crate::action::RepairContext;
use crate::error::RepairError;

/// What a stage did with its input.
pub enum StageOutcome {
    /// The stage produced a final result; the orchestrator stops here
    /// (subject to `Options::early_exit`).
    Ok(String),
    /// The stage found nothing it could usefully change; pass the bytes
    /// (possibly identical to the input) on to the next stage.
    Continue(String),
}

/// The uniform contract every pipeline stage implements.
///
/// This is the typed equivalent of the single behavior contract
/// (`process/2`, `supports?/1`, `priority/0`, `name/0`) the pipeline this
/// crate implements is built around: one trait, five methods, a
/// discriminated-union return type instead of an exception.
pub trait Stage {
    /// Short, stable identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Fixed pipeline position. Lower runs first. Stage order is static in
    /// this crate (the pipeline never reorders stages at runtime); priority
    /// exists so the orchestrator's stage list can be asserted sorted.
    fn priority(&self) -> u8;

    /// Cheap pre-check: does this stage have anything to do with `input`?
    /// A `false` result lets the orchestrator skip calling `process` at all.
    fn supports(&self, input: &str) -> bool;

    /// Run the stage. `ctx` carries the options, the repair-action log, and
    /// per-stage metadata across the whole pipeline run.
    fn process(&self, input: String, ctx: &mut RepairContext) -> Result<StageOutcome, RepairError>;
}

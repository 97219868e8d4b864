//! Repairs malformed JSON-like text — LLM output, legacy Python literals,
//! truncated streams, commented config files — into valid JSON, through a
//! five-stage pipeline with an auditable log of every repair applied.
//!
//! The five stages (plus a pre-stage) run in a fixed order; see
//! [`pipeline`] for the orchestration and [`stage::Stage`] for the contract
//! each one implements:
//!
//! 1. `MultipleJsonDetector` — aggregate concatenated top-level values.
//! 2. `ContentCleaning` (L1) — strip fences, wrappers, comments, prose.
//! 3. `StructuralRepair` (L2) — balance `{}`/`[]` delimiters.
//! 4. `SyntaxNormalization` (L3) — quote/literal/comma/colon normalization.
//! 5. `Validation` (L4) — a strict `serde_json` decode.
//! 6. `TolerantParsing` (L5) — last-resort recursive descent, only when L4
//!    fails and [`options::Strictness`] permits it.
//!
//! # Examples
//!
//! ```
//! use jsonmend::{repair_to_string, Options};
//!
//! let broken = br#"{name: 'John', age: 30,}"#;
//! let repaired = repair_to_string(broken, &Options::default())?;
//! assert_eq!(repaired, r#"{"name":"John","age":30}"#);
//! # Ok::<(), jsonmend::RepairError>(())
//! ```

pub mod action;
mod classify;
pub mod cli;
#[cfg(feature = "serde")]
mod debug;
mod emit;
pub mod error;
pub mod options;
mod pipeline;
pub mod stage;
mod stages;
pub mod stream;
#[cfg(test)]
mod tests;

pub use action::{RepairAction, RepairContext, Stage as RepairStage};
#[cfg(feature = "serde")]
pub use debug::{repair_with_debug, DebugInfo, StepInfo};
pub use error::{RepairError, RepairErrorKind};
pub use options::{Options, Strictness};
#[cfg(feature = "serde")]
pub use pipeline::{repair, RepairOutcome};
pub use stream::StreamRepair;

/// Repairs `input` and returns the repaired JSON text without parsing it
/// into a structured value. The cheapest entry point: skips the
/// `serde_json::Value` construction [`repair`] performs.
pub fn repair_to_string(input: &[u8], opts: &Options) -> Result<String, RepairError> {
    pipeline::repair_to_string(input, opts)
}

/// Repairs each item of `chunks` independently, one-shot per item by
/// default; see [`StreamRepair`] and [`Options::buffer_incomplete`].
pub fn repair_stream<'a, I>(chunks: I, opts: &'a Options) -> StreamRepair<'a, I>
where
    I: Iterator<Item = &'a [u8]>,
{
    StreamRepair::new(chunks, opts)
}

/// How aggressively the pipeline recovers from input L1–L4 cannot salvage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Disable L5 entirely: a failed L4 validation is a hard `Unrepairable` error.
    Strict,
    /// Run L5 with its default recovery thresholds. The default.
    #[default]
    Lenient,
    /// Run L5 with lowered cost thresholds, recovering more at the cost of
    /// more aggressive guesses (e.g. coercing more malformed numbers to strings).
    Permissive,
}

/// The complete recognized option set for the repair pipeline.
///
/// Every field here corresponds to one row in the options table of the
/// specification this crate implements; see each field's doc comment for its
/// effect.
#[derive(Clone, Debug)]
pub struct Options {
    /// When true, [`crate::repair`] and friends return the full
    /// [`crate::action::RepairAction`] log alongside the repaired value.
    pub logging: bool,
    /// Attempt a strict JSON decode of the raw input before running any
    /// stage. This is the common case when the caller already has valid JSON.
    pub fast_path_optimization: bool,
    /// Controls whether L5 (tolerant parsing) runs, and how aggressively.
    pub strictness: Strictness,
    /// Return as soon as a stage reports `Ok` instead of running remaining
    /// stages. Has no effect beyond L4 (L4's `Ok` always terminates).
    pub early_exit: bool,
    /// Input size ceiling, in mebibytes. Inputs over this size are rejected
    /// with `RepairErrorKind::InputTooLarge` before any stage runs.
    pub max_size_mb: u64,
    /// Wall-clock ceiling for a single repair invocation, in milliseconds.
    pub timeout_ms: u64,
    /// Maximum nesting depth the structural-repair stack (L2) and the
    /// tolerant parser (L5) will track before erroring.
    pub max_nesting_depth: usize,
    /// Enable the pre-L1 `MultipleJsonDetector`, which aggregates two or
    /// more concatenated top-level JSON values into an array.
    pub enable_multiple_json_aggregation: bool,
    /// Merge concatenated objects/arrays at structural boundaries during L2
    /// (inserting commas between adjacent complete values at the top level).
    pub enable_object_merging: bool,
    /// Run the L3 hardcoded pre-pass (smart-quote mapping, doubled-quote
    /// collapsing, thousands-separator stripping) before L2 runs.
    pub enable_early_hardcoded_patterns: bool,
    /// Expand `\uXXXX` / `\xXX` escape sequences to their code points when
    /// they appear outside string literals. Off by default: most occurrences
    /// outside strings are incidental, not intentional escapes.
    pub enable_escape_normalization: bool,
    /// When a chunk passed to [`crate::repair_stream`] cannot be repaired on
    /// its own, hold it and prepend it to the next chunk before retrying,
    /// instead of surfacing the failure immediately.
    pub buffer_incomplete: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            logging: false,
            fast_path_optimization: true,
            strictness: Strictness::Lenient,
            early_exit: true,
            max_size_mb: 10,
            timeout_ms: 5000,
            max_nesting_depth: 50,
            enable_multiple_json_aggregation: true,
            enable_object_merging: true,
            enable_early_hardcoded_patterns: true,
            enable_escape_normalization: false,
            buffer_incomplete: false,
        }
    }
}

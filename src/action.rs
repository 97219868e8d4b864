use crate::options::Options;
use std::collections::HashMap;

/// Which pipeline stage produced a [`RepairAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    MultipleJsonDetector,
    ContentCleaning,
    StructuralRepair,
    SyntaxNormalization,
    Validation,
    TolerantParsing,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::MultipleJsonDetector => "multiple-json-detector",
            Stage::ContentCleaning => "content-cleaning",
            Stage::StructuralRepair => "structural-repair",
            Stage::SyntaxNormalization => "syntax-normalization",
            Stage::Validation => "validation",
            Stage::TolerantParsing => "tolerant-parsing",
        }
    }
}

/// An append-only record of a single transformation applied to the input.
///
/// Positions are Unicode scalar (character) indices, never byte offsets, so
/// they stay meaningful to a human reading the log next to the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairAction {
    pub stage: Stage,
    pub action: String,
    pub position: Option<usize>,
    pub original: Option<String>,
    pub replacement: Option<String>,
}

impl RepairAction {
    pub fn new(stage: Stage, action: impl Into<String>) -> Self {
        Self {
            stage,
            action: action.into(),
            position: None,
            original: None,
            replacement: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn replacing(mut self, original: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self.replacement = Some(replacement.into());
        self
    }
}

/// The mutable carrier handed from stage to stage.
///
/// A context is created once per pipeline run and never forked: each stage
/// receives it by unique reference, appends to the action log, and may read
/// or write its own entry in `metadata` (keyed by stage name) without
/// disturbing any other stage's bookkeeping. Used by `Validation` to leave
/// its `serde_json` parse error for `TolerantParsing` to fold into its own
/// action description.
pub struct RepairContext {
    actions: Vec<RepairAction>,
    total_repairs: usize,
    pub options: Options,
    metadata: HashMap<&'static str, String>,
    logging_enabled: bool,
}

impl RepairContext {
    pub fn new(options: Options) -> Self {
        let logging_enabled = options.logging;
        Self {
            actions: Vec::new(),
            total_repairs: 0,
            options,
            metadata: HashMap::new(),
            logging_enabled,
        }
    }

    /// Record a repair action. The running count is kept regardless of
    /// `options.logging` (so `repair_with_debug` reports an accurate
    /// `total_repairs`); the action itself is only retained when a caller
    /// asked for the full log.
    pub fn record(&mut self, action: RepairAction) {
        self.total_repairs += 1;
        if self.logging_enabled {
            self.actions.push(action);
        }
    }

    pub fn actions(&self) -> &[RepairAction] {
        &self.actions
    }

    pub fn total_repairs(&self) -> usize {
        self.total_repairs
    }

    pub fn into_actions(self) -> Vec<RepairAction> {
        self.actions
    }

    pub fn set_metadata(&mut self, stage: &'static str, value: impl Into<String>) {
        self.metadata.insert(stage, value.into());
    }

    pub fn metadata(&self, stage: &'static str) -> Option<&str> {
        self.metadata.get(stage).map(|s| s.as_str())
    }
}

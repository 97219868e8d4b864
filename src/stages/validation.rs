use crate::action::RepairContext;
use crate::action::Stage as StageKind;
use crate::error::RepairError;
use crate::stage::{Stage, StageOutcome};

/// L4: the cheap, authoritative check. If `serde_json` already accepts the
/// text, the pipeline is done; otherwise control passes on to L5.
pub struct Validation;

impl Stage for Validation {
    fn name(&self) -> &'static str {
        StageKind::Validation.name()
    }

    fn priority(&self) -> u8 {
        40
    }

    fn supports(&self, _input: &str) -> bool {
        true
    }

    #[cfg(feature = "serde")]
    fn process(&self, input: String, ctx: &mut RepairContext) -> Result<StageOutcome, RepairError> {
        match serde_json::from_str::<serde_json::Value>(&input) {
            Ok(_) => Ok(StageOutcome::Ok(input)),
            Err(err) => {
                ctx.set_metadata(StageKind::Validation.name(), err.to_string());
                Ok(StageOutcome::Continue(input))
            }
        }
    }

    #[cfg(not(feature = "serde"))]
    fn process(&self, input: String, _ctx: &mut RepairContext) -> Result<StageOutcome, RepairError> {
        Ok(StageOutcome::Continue(input))
    }
}

//! The five repair stages plus the pre-stage aggregator, each implementing
//! [`crate::stage::Stage`]. [`crate::pipeline`] owns their ordering; this
//! module only owns their individual behavior.

pub mod content_cleaning;
pub mod multiple_json;
pub mod structural_repair;
pub mod syntax_normalization;
pub mod tolerant_parsing;
pub mod validation;

pub use content_cleaning::ContentCleaning;
pub use multiple_json::MultipleJsonDetector;
pub use structural_repair::StructuralRepair;
pub use syntax_normalization::{run_pre_pass, SyntaxNormalization};
pub use tolerant_parsing::TolerantParsing;
pub use validation::Validation;

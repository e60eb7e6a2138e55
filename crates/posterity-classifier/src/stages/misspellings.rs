use crate::result::Classification;
use crate::scan::ScanText;
use crate::stages::{Stage, StageVerdict};
use crate::terms::MISSPELLINGS;

/// Stage 5: known-misspelling dictionary scan.
pub struct MisspellingScan;

impl Stage for MisspellingScan {
    fn stage_name(&self) -> &'static str {
        "misspelling scan"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        for (term, category) in MISSPELLINGS {
            if text.lower.contains(term) {
                return StageVerdict::Decided(Classification::prohibited(*category, *term, 90));
            }
        }
        StageVerdict::Continue
    }
}

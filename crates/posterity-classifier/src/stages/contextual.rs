use crate::result::Classification;
use crate::scan::{contains_word, ScanText};
use crate::stages::{Stage, StageVerdict};
use crate::terms::CONTEXTUAL_KEYWORDS;

/// Stage 8: contextual advisory scan.
///
/// These terms recall real policy violations but fire constantly in
/// ordinary asset-management language, so they are demoted to advisory:
/// the verdict is NOT prohibited, and the category and matched term are
/// returned for the caller's audit log only.
pub struct ContextualScan;

impl Stage for ContextualScan {
    fn stage_name(&self) -> &'static str {
        "contextual advisory scan"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        for (term, category) in CONTEXTUAL_KEYWORDS {
            if contains_word(&text.lower, term) {
                return StageVerdict::Decided(Classification::advisory(*category, *term, 85));
            }
        }
        StageVerdict::Continue
    }
}

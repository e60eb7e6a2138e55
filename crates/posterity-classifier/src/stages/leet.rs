use crate::result::Classification;
use crate::scan::{leet_normalize, ScanText};
use crate::stages::keywords::scan_primary;
use crate::stages::{Stage, StageVerdict};

/// Stage 6: leet-speak normalization followed by a primary re-scan.
///
/// Lower confidence than the direct keyword hit: substitution can
/// manufacture words ("5 toys" normalizing into "s toys" and so on), so a
/// normalized match is strong evidence, not proof.
pub struct LeetNormalizedScan;

impl Stage for LeetNormalizedScan {
    fn stage_name(&self) -> &'static str {
        "leet-normalized scan"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        let normalized = leet_normalize(&text.lower);
        if normalized == text.lower {
            // No substitutions applied; stage 4 already scanned this text.
            return StageVerdict::Continue;
        }
        match scan_primary(&normalized) {
            Some((term, category)) => {
                StageVerdict::Decided(Classification::prohibited(category, term, 85))
            }
            None => StageVerdict::Continue,
        }
    }
}

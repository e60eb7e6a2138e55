use crate::result::Classification;
use crate::scan::ScanText;
use crate::stages::{Stage, StageVerdict};
use crate::terms::PREFILTER_BIGRAMS;

/// Stage 2: bigram pre-filter.
///
/// A performance optimization, not a policy decision: every blocking term
/// contains at least one of the curated bigrams, so text containing none
/// of them is clean after a single linear pass instead of dozens of
/// keyword scans. Text that does contain one simply falls through.
pub struct BigramPrefilter;

impl Stage for BigramPrefilter {
    fn stage_name(&self) -> &'static str {
        "bigram pre-filter"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        let any_hit = PREFILTER_BIGRAMS.iter().any(|b| text.lower.contains(b));
        if any_hit {
            StageVerdict::Continue
        } else {
            StageVerdict::Decided(Classification::clean())
        }
    }
}

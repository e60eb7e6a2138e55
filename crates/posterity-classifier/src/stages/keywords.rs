use crate::result::{Category, Classification};
use crate::scan::{contains_word, ScanText};
use crate::stages::{Stage, StageVerdict};
use crate::terms::PRIMARY_KEYWORDS;

/// Scan lowercased text against the primary keyword table. Shared with the
/// leet-normalization stage, which re-runs it on substituted text.
pub fn scan_primary(lower: &str) -> Option<(&'static str, Category)> {
    for (term, category, boundary) in PRIMARY_KEYWORDS {
        let hit = if *boundary {
            contains_word(lower, term)
        } else {
            lower.contains(term)
        };
        if hit {
            return Some((term, *category));
        }
    }
    None
}

/// Stage 4: primary keyword scan, case-insensitive, word-boundary for the
/// marked subset.
pub struct PrimaryKeywordScan;

impl Stage for PrimaryKeywordScan {
    fn stage_name(&self) -> &'static str {
        "primary keyword scan"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        match scan_primary(&text.lower) {
            Some((term, category)) => {
                StageVerdict::Decided(Classification::prohibited(category, term, 95))
            }
            None => StageVerdict::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(input: &str) -> StageVerdict {
        PrimaryKeywordScan.evaluate(&ScanText::prepare(input))
    }

    #[test]
    fn keyword_hit() {
        match verdict("donate to the election fund") {
            StageVerdict::Decided(c) => {
                assert!(c.prohibited);
                assert_eq!(c.confidence, 95);
                assert_eq!(c.matched.as_deref(), Some("election"));
            }
            StageVerdict::Continue => panic!("expected hit"),
        }
    }

    #[test]
    fn case_insensitive() {
        assert!(matches!(
            verdict("Fund The CAMPAIGN"),
            StageVerdict::Decided(_)
        ));
    }

    #[test]
    fn boundary_terms_do_not_match_substrings() {
        assert!(matches!(verdict("a devoted archivist"), StageVerdict::Continue));
        assert!(matches!(verdict("market impact study"), StageVerdict::Continue));
        assert!(matches!(verdict("bombastic memoirs"), StageVerdict::Continue));
    }

    #[test]
    fn boundary_terms_match_whole_words() {
        assert!(matches!(verdict("buy a vote"), StageVerdict::Decided(_)));
        assert!(matches!(verdict("fund the pac"), StageVerdict::Decided(_)));
    }

    #[test]
    fn benign_asset_language_passes() {
        assert!(matches!(
            verdict("insurance policy distribution"),
            StageVerdict::Continue
        ));
        assert!(matches!(verdict("conservative estimate"), StageVerdict::Continue));
    }
}

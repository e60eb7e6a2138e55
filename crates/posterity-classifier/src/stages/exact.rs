use crate::result::Classification;
use crate::scan::ScanText;
use crate::stages::{Stage, StageVerdict};
use crate::terms::EXACT_ACTIONS;

/// Stage 3: exact match against known-prohibited action identifiers.
pub struct ExactActionScan;

impl Stage for ExactActionScan {
    fn stage_name(&self) -> &'static str {
        "exact action scan"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        let trimmed = text.lower.trim();
        for (action, category) in EXACT_ACTIONS {
            if trimmed == *action {
                return StageVerdict::Decided(Classification::prohibited(
                    *category, *action, 100,
                ));
            }
        }
        StageVerdict::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Category;

    #[test]
    fn exact_identifier_is_certain() {
        let text = ScanText::prepare("influence_election");
        match ExactActionScan.evaluate(&text) {
            StageVerdict::Decided(c) => {
                assert!(c.prohibited);
                assert_eq!(c.confidence, 100);
                assert_eq!(c.category, Some(Category::Political));
            }
            StageVerdict::Continue => panic!("expected exact hit"),
        }
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        let text = ScanText::prepare("  LAUNDER_MONEY ");
        assert!(matches!(
            ExactActionScan.evaluate(&text),
            StageVerdict::Decided(_)
        ));
    }

    #[test]
    fn embedded_identifier_is_not_exact() {
        // Substring occurrences are the keyword stages' business.
        let text = ScanText::prepare("discuss influence_election safeguards");
        assert!(matches!(
            ExactActionScan.evaluate(&text),
            StageVerdict::Continue
        ));
    }
}

use crate::result::Classification;
use crate::scan::ScanText;
use crate::stages::{Stage, StageVerdict};
use crate::terms::PHRASES;

/// Stage 7: curated multi-word phrase scan. Catches combinations whose
/// individual words are benign or merely advisory.
pub struct PhraseScan;

impl Stage for PhraseScan {
    fn stage_name(&self) -> &'static str {
        "phrase scan"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        for (phrase, category) in PHRASES {
            if text.lower.contains(phrase) {
                return StageVerdict::Decided(Classification::prohibited(*category, *phrase, 90));
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
    fn phrase_of_benign_words_is_caught() {
        let text = ScanText::prepare("route dark money through the estate");
        match PhraseScan.evaluate(&text) {
            StageVerdict::Decided(c) => {
                assert!(c.prohibited);
                assert_eq!(c.confidence, 90);
                assert_eq!(c.category, Some(Category::Political));
            }
            StageVerdict::Continue => panic!("expected hit"),
        }
    }

    #[test]
    fn constituent_words_alone_pass() {
        for input in ["a dark room", "money for repairs", "trading hours"] {
            let text = ScanText::prepare(input);
            assert!(
                matches!(PhraseScan.evaluate(&text), StageVerdict::Continue),
                "false positive on {input:?}"
            );
        }
    }
}

use crate::result::{Category, Classification};
use crate::scan::ScanText;
use crate::stages::{Stage, StageVerdict};

/// Codepoint ranges that carry confusable Latin look-alikes. Accented
/// Latin and non-Latin scripts without that ambiguity pass untouched.
const CONFUSABLE_RANGES: &[(u32, u32)] = &[
    (0x0370, 0x03FF),   // Greek and Coptic ("ο", "α", "ε")
    (0x0400, 0x04FF),   // Cyrillic ("е", "а", "о", "с")
    (0xFF01, 0xFF5E),   // Fullwidth forms
    (0x1D400, 0x1D7FF), // Mathematical alphanumerics
];

/// Invisible characters used to split keywords mid-term.
const INVISIBLE_RANGES: &[(u32, u32)] = &[
    (0x200B, 0x200F), // Zero-width space/joiners, directional marks
    (0x2060, 0x2060), // Word joiner
    (0xFEFF, 0xFEFF), // Zero-width no-break space
];

fn in_ranges(c: char, ranges: &[(u32, u32)]) -> bool {
    let cp = c as u32;
    ranges.iter().any(|(lo, hi)| cp >= *lo && cp <= *hi)
}

/// Stage 1: charset guard.
///
/// Homoglyph substitution defeats every keyword scan downstream, so text
/// carrying confusable or invisible codepoints is rejected outright
/// rather than scanned.
pub struct CharsetGuard;

impl Stage for CharsetGuard {
    fn stage_name(&self) -> &'static str {
        "charset guard"
    }

    fn evaluate(&self, text: &ScanText) -> StageVerdict {
        for c in text.raw.chars() {
            if in_ranges(c, CONFUSABLE_RANGES) || in_ranges(c, INVISIBLE_RANGES) {
                return StageVerdict::Decided(Classification::prohibited(
                    Category::Obfuscation,
                    c.to_string(),
                    80,
                ));
            }
        }
        StageVerdict::Continue
    }
}

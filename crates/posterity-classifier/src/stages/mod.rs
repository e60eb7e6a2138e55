//! The cascade stages, cheapest and most certain first.

mod charset;
mod contextual;
mod exact;
mod keywords;
mod leet;
mod misspellings;
mod phrases;
mod prefilter;

pub use charset::CharsetGuard;
pub use contextual::ContextualScan;
pub use exact::ExactActionScan;
pub use keywords::PrimaryKeywordScan;
pub use leet::LeetNormalizedScan;
pub use misspellings::MisspellingScan;
pub use phrases::PhraseScan;
pub use prefilter::BigramPrefilter;

use crate::result::Classification;
use crate::scan::ScanText;

/// Outcome of one cascade stage.
pub enum StageVerdict {
    /// The stage reached a verdict; the cascade stops here.
    Decided(Classification),
    /// No verdict; fall through to the next stage.
    Continue,
}

/// One pure, independently testable predicate stage.
pub trait Stage: Send + Sync {
    fn stage_name(&self) -> &'static str;

    fn evaluate(&self, text: &ScanText) -> StageVerdict;
}

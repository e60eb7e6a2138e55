//! Layered content-policy classifier for action descriptions.
//!
//! `Classifier::classify` is pure and deterministic: no I/O, no clock, no
//! allocation beyond one lowercase pass, never panics, never errors. The
//! cascade runs cheapest/most-certain stage first and short-circuits on
//! the first verdict.
//!
//! Callers must log advisory matches but treat only `prohibited == true`
//! as execution-blocking.

pub mod result;
pub mod scan;
pub mod stages;
pub mod terms;

pub use result::{Category, Classification};

use tracing::trace;

use posterity_types::limits::MAX_CLASSIFY_LEN;

use crate::scan::ScanText;
use crate::stages::{
    BigramPrefilter, CharsetGuard, ContextualScan, ExactActionScan, LeetNormalizedScan,
    MisspellingScan, PhraseScan, PrimaryKeywordScan, Stage, StageVerdict,
};

/// The content-policy engine: an ordered list of pure predicate stages.
pub struct Classifier {
    stages: Vec<Box<dyn Stage>>,
}

impl Classifier {
    /// The full cascade, in policy order.
    pub fn new() -> Self {
        Self {
            stages: vec![
                Box::new(CharsetGuard),
                Box::new(BigramPrefilter),
                Box::new(ExactActionScan),
                Box::new(PrimaryKeywordScan),
                Box::new(MisspellingScan),
                Box::new(LeetNormalizedScan),
                Box::new(PhraseScan),
                Box::new(ContextualScan),
            ],
        }
    }

    /// Classify one action description.
    pub fn classify(&self, text: &str) -> Classification {
        // Cost-exhaustion defense: oversized input is rejected before any
        // scanning or case-folding touches it.
        if text.len() > MAX_CLASSIFY_LEN {
            return Classification::prohibited(Category::Obfuscation, "oversized input", 100);
        }

        let prepared = ScanText::prepare(text);
        for stage in &self.stages {
            if let StageVerdict::Decided(classification) = stage.evaluate(&prepared) {
                trace!(
                    stage = stage.stage_name(),
                    prohibited = classification.prohibited,
                    confidence = classification.confidence,
                    "classifier verdict"
                );
                return classification;
            }
        }
        Classification::clean()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

use serde::{Deserialize, Serialize};

/// Minimum resolver-reported certainty required before any action executes.
///
/// Fixed at construction of the system, never per-instance configurable.
/// No role exists that can raise or lower it at runtime.
pub const CONFIDENCE_THRESHOLD: u8 = 95;

/// An integer certainty score in 0..=100.
///
/// Resolver results, trigger verifications, and classifier verdicts all
/// report confidence on this scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Confidence(u8);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0);
    pub const CERTAIN: Confidence = Confidence(100);

    /// Construct a confidence, clamping anything above 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether this score clears the execution threshold.
    pub fn meets_threshold(&self) -> bool {
        self.0 >= CONFIDENCE_THRESHOLD
    }
}

impl From<u8> for Confidence {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

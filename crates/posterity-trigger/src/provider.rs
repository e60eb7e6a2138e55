use posterity_types::{ActorId, Digest};

/// What the external verification provider currently knows about an event.
///
/// Providers settle asynchronously in the real world (bonding, dispute
/// windows, proof verification); the core consumes only this snapshot. A
/// provider that never resolves keeps answering `Pending`, which reads as
/// "not yet triggered" — never as "triggered".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Resolved { valid: bool, confidence: u8 },
    Disputed,
}

impl VerificationStatus {
    /// The one view the trigger engine consumes: valid at >= 95 confidence.
    pub fn confirms(&self) -> bool {
        matches!(self, Self::Resolved { valid: true, confidence } if *confidence >= 95)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Resolved { valid, confidence } => {
                write!(f, "resolved(valid={}, confidence={})", valid, confidence)
            }
            Self::Disputed => write!(f, "disputed"),
        }
    }
}

/// External trigger-verification provider.
pub trait TriggerVerification: Send + Sync {
    fn check(&self, creator: &ActorId, event_type: &str, data_digest: &Digest)
        -> VerificationStatus;
}

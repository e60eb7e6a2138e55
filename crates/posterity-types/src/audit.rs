use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, ClusterId, EventId, LicenseId};
use crate::temporal::Timestamp;

/// Why a gated operation performed no mutation.
///
/// Inaction is a designed outcome, not an error: the gate held, the system
/// did nothing, and the fact that it did nothing is recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InactionReason {
    /// Resolver confidence was below the execution threshold.
    LowConfidence { confidence: u8 },
    /// The content classifier prohibited the action description.
    Prohibited {
        category: String,
        matched: Option<String>,
        confidence: u8,
    },
}

impl std::fmt::Display for InactionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowConfidence { confidence } => {
                write!(f, "confidence {}/100 below threshold", confidence)
            }
            Self::Prohibited {
                category, matched, ..
            } => match matched {
                Some(term) => write!(f, "prohibited ({}): matched {:?}", category, term),
                None => write!(f, "prohibited ({})", category),
            },
        }
    }
}

/// One entry in the public, append-only record of every transition.
///
/// Every observable state change lands here, and so does every inaction
/// outcome — a gate that held is as much a fact as an action that ran.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AuditEvent {
    IntentCaptured {
        creator: ActorId,
        at: Timestamp,
    },
    IntentRevoked {
        creator: ActorId,
        at: Timestamp,
    },
    GoalAdded {
        creator: ActorId,
        priority: u8,
        at: Timestamp,
    },
    TriggerConfigured {
        creator: ActorId,
        mode: String,
        at: Timestamp,
    },
    CheckIn {
        creator: ActorId,
        at: Timestamp,
    },
    SignatureSubmitted {
        creator: ActorId,
        signer: ActorId,
        collected: u32,
        at: Timestamp,
    },
    Triggered {
        creator: ActorId,
        mode: String,
        at: Timestamp,
    },
    ExecutionActivated {
        creator: ActorId,
        at: Timestamp,
    },
    ActionExecuted {
        creator: ActorId,
        action_key: String,
        confidence: u8,
        at: Timestamp,
    },
    LicenseIssued {
        creator: ActorId,
        license: LicenseId,
        licensee: ActorId,
        at: Timestamp,
    },
    ProjectFunded {
        creator: ActorId,
        recipient: ActorId,
        amount_minor: u64,
        at: Timestamp,
    },
    RevenueDistributed {
        creator: ActorId,
        recipients: u32,
        total_minor: u64,
        at: Timestamp,
    },
    TreasuryDeposit {
        creator: ActorId,
        amount_minor: u64,
        at: Timestamp,
    },
    /// A gated operation that performed no mutation, and why.
    Inaction {
        creator: ActorId,
        action_key: String,
        reason: InactionReason,
        at: Timestamp,
    },
    /// Advisory classifier match: not blocking, recorded for audit only.
    AdvisoryMatch {
        creator: ActorId,
        action_key: String,
        category: String,
        matched: String,
        confidence: u8,
        at: Timestamp,
    },
    SunsetInitiated {
        creator: ActorId,
        emergency: bool,
        at: Timestamp,
    },
    AssetsArchived {
        creator: ActorId,
        batch_size: u32,
        total_archived: u32,
        at: Timestamp,
    },
    ArchiveFinalized {
        creator: ActorId,
        archive_locator: String,
        at: Timestamp,
    },
    IpTransitioned {
        creator: ActorId,
        license: String,
        at: Timestamp,
    },
    Clustered {
        creator: ActorId,
        cluster: ClusterId,
        at: Timestamp,
    },
    SunsetCompleted {
        creator: ActorId,
        at: Timestamp,
    },
}

impl AuditEvent {
    /// The creator whose state machine this event belongs to.
    pub fn creator(&self) -> ActorId {
        match self {
            Self::IntentCaptured { creator, .. }
            | Self::IntentRevoked { creator, .. }
            | Self::GoalAdded { creator, .. }
            | Self::TriggerConfigured { creator, .. }
            | Self::CheckIn { creator, .. }
            | Self::SignatureSubmitted { creator, .. }
            | Self::Triggered { creator, .. }
            | Self::ExecutionActivated { creator, .. }
            | Self::ActionExecuted { creator, .. }
            | Self::LicenseIssued { creator, .. }
            | Self::ProjectFunded { creator, .. }
            | Self::RevenueDistributed { creator, .. }
            | Self::TreasuryDeposit { creator, .. }
            | Self::Inaction { creator, .. }
            | Self::AdvisoryMatch { creator, .. }
            | Self::SunsetInitiated { creator, .. }
            | Self::AssetsArchived { creator, .. }
            | Self::ArchiveFinalized { creator, .. }
            | Self::IpTransitioned { creator, .. }
            | Self::Clustered { creator, .. }
            | Self::SunsetCompleted { creator, .. } => *creator,
        }
    }

    /// Whether this event records a held gate rather than a state change.
    pub fn is_inaction(&self) -> bool {
        matches!(self, Self::Inaction { .. })
    }
}

/// A recorded audit entry: the event plus its assigned id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: EventId,
    pub event: AuditEvent,
}

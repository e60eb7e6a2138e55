use serde::{Deserialize, Serialize};

use posterity_types::limits::{MAX_CORPUS_SPAN_YEARS, MIN_CORPUS_SPAN_YEARS};
use posterity_types::{ActorId, Digest, Timestamp};

use crate::error::IntentError;

/// The years of source material fixed at capture time. Immutable after
/// capture: the corpus used to interpret ambiguous intent is frozen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusWindow {
    pub start_year: i32,
    pub end_year: i32,
}

impl CorpusWindow {
    /// Validate the window span: between five and ten years inclusive.
    /// Narrower windows carry too little context to resolve intent;
    /// wider ones dilute it.
    pub fn validate(&self) -> Result<(), IntentError> {
        let span = self.end_year - self.start_year;
        if !(MIN_CORPUS_SPAN_YEARS..=MAX_CORPUS_SPAN_YEARS).contains(&span) {
            return Err(IntentError::InvalidCorpusWindow {
                span,
                min: MIN_CORPUS_SPAN_YEARS,
                max: MAX_CORPUS_SPAN_YEARS,
            });
        }
        Ok(())
    }
}

/// A pre-authorized goal guiding posthumous execution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Goal {
    pub description: String,
    pub constraint_digest: Digest,
    /// 1..=100; higher executes first when goals compete for treasury.
    pub priority: u8,
    pub active: bool,
}

/// A reference to an asset covered by the intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef(pub String);

/// Single tagged lifecycle state for an intent record.
///
/// The transition table is the whole of the edges below; `triggered` and
/// `revoked` are monotonic and mutually exclusive because no edge leads
/// out of either terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentLifecycle {
    /// Captured and dormant, awaiting trigger or revocation.
    Active,
    /// Creator withdrew the intent. Terminal.
    Revoked { at: Timestamp },
    /// The trigger fired. Terminal; revocation is impossible from here.
    Triggered { at: Timestamp },
}

impl IntentLifecycle {
    pub fn triggered(&self) -> bool {
        matches!(self, Self::Triggered { .. })
    }

    pub fn revoked(&self) -> bool {
        matches!(self, Self::Revoked { .. })
    }

    /// `Active -> Revoked`. The only legal revocation edge.
    pub fn revoke(self, at: Timestamp) -> Result<Self, IntentError> {
        match self {
            Self::Active => Ok(Self::Revoked { at }),
            Self::Revoked { .. } => Err(IntentError::AlreadyRevoked),
            Self::Triggered { .. } => Err(IntentError::AlreadyTriggered),
        }
    }

    /// `Active -> Triggered`. The only legal trigger edge.
    pub fn trigger(self, at: Timestamp) -> Result<Self, IntentError> {
        match self {
            Self::Active => Ok(Self::Triggered { at }),
            Self::Revoked { .. } => Err(IntentError::AlreadyRevoked),
            Self::Triggered { .. } => Err(IntentError::AlreadyTriggered),
        }
    }

    /// Whether record mutations (goals, asset refs) are still allowed.
    pub fn mutable(&self) -> Result<(), IntentError> {
        match self {
            Self::Active => Ok(()),
            Self::Revoked { .. } => Err(IntentError::AlreadyRevoked),
            Self::Triggered { .. } => Err(IntentError::AlreadyTriggered),
        }
    }
}

/// A creator's captured intent. Exclusively owned by that creator's state
/// machine; never shared across creators.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentRecord {
    pub creator: ActorId,
    pub intent_digest: Digest,
    pub corpus_digest: Digest,
    pub corpus_locator: String,
    pub asset_locator: Option<String>,
    pub corpus_window: CorpusWindow,
    /// Bumped on every successful mutation of this record.
    pub revision: u64,
    pub goals: Vec<Goal>,
    pub asset_refs: Vec<AssetRef>,
    pub lifecycle: IntentLifecycle,
    pub created_at: Timestamp,
}

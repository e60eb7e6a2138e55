use serde::{Deserialize, Serialize};

use posterity_types::limits::ACTIVE_WINDOW_DAYS;
use posterity_types::{ActorId, Digest, LicenseId, Timestamp};

use crate::error::ExecutionError;

/// Execution lifecycle: `Dormant -> Active -> Sunset`, one way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionPhase {
    /// Record exists (treasury may be funded) but the trigger has not fired.
    Dormant,
    /// The twenty-year execution window is running.
    Active { activated_at: Timestamp },
    /// Terminal. All gated operations are halted forever.
    Sunset {
        activated_at: Timestamp,
        sunset_at: Timestamp,
    },
}

impl ExecutionPhase {
    /// `Dormant -> Active`.
    pub fn activate(self, creator: ActorId, at: Timestamp) -> Result<Self, ExecutionError> {
        match self {
            Self::Dormant => Ok(Self::Active { activated_at: at }),
            Self::Active { .. } => Err(ExecutionError::AlreadyActive(creator)),
            Self::Sunset { .. } => Err(ExecutionError::AlreadySunset(creator)),
        }
    }

    /// `Active -> Sunset`, legal once the window has elapsed (inclusive).
    pub fn sunset(self, creator: ActorId, now: Timestamp) -> Result<Self, ExecutionError> {
        match self {
            Self::Dormant => Err(ExecutionError::NotActive(creator)),
            Self::Active { activated_at } => {
                let boundary = activated_at.plus_days(ACTIVE_WINDOW_DAYS);
                if now < boundary {
                    return Err(ExecutionError::SunsetNotReached {
                        remaining_secs: (boundary.0 - now.0).num_seconds(),
                    });
                }
                Ok(Self::Sunset {
                    activated_at,
                    sunset_at: now,
                })
            }
            Self::Sunset { .. } => Err(ExecutionError::AlreadySunset(creator)),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn is_sunset(&self) -> bool {
        matches!(self, Self::Sunset { .. })
    }

    pub fn activated_at(&self) -> Option<Timestamp> {
        match self {
            Self::Dormant => None,
            Self::Active { activated_at } | Self::Sunset { activated_at, .. } => {
                Some(*activated_at)
            }
        }
    }
}

/// One gated action that actually ran.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionLogEntry {
    pub action_key: String,
    pub citation: String,
    pub confidence: u8,
    pub at: Timestamp,
}

/// A license issued during the execution window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct License {
    pub id: LicenseId,
    pub licensee: ActorId,
    pub terms_digest: Digest,
    /// Royalty in basis points, 0..=10_000.
    pub royalty_bps: u16,
    pub issued_at: Timestamp,
}

/// Per-creator execution state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub creator: ActorId,
    pub phase: ExecutionPhase,
    /// Treasury balance in minor units.
    pub treasury_minor: u64,
    pub log: Vec<ExecutionLogEntry>,
    pub licenses: Vec<License>,
}

impl ExecutionRecord {
    pub fn dormant(creator: ActorId) -> Self {
        Self {
            creator,
            phase: ExecutionPhase::Dormant,
            treasury_minor: 0,
            log: Vec::new(),
            licenses: Vec::new(),
        }
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use posterity_types::limits::{MAX_SIGNERS, MIN_DEADMAN_INTERVAL_DAYS, MIN_QUORUM_THRESHOLD};
use posterity_types::{ActorId, Digest, Timestamp};

use crate::error::TriggerError;

/// One of the three ways a dormant intent becomes executable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TriggerMode {
    /// The creator periodically proves liveness; silence beyond the
    /// interval arms the trigger.
    DeadmanSwitch {
        interval_days: u64,
        last_check_in: Timestamp,
    },
    /// A bounded signer set attests; the trigger arms at the threshold.
    /// Submitted signatures are tracked per signer and counted
    /// incrementally — no rescans.
    TrustedQuorum {
        signers: Vec<ActorId>,
        threshold: u32,
        submitted: BTreeMap<ActorId, Timestamp>,
    },
    /// An external provider attests the real-world event.
    OracleVerified {
        event_type: String,
        data_digest: Digest,
        provider: String,
    },
}

impl TriggerMode {
    /// Short tag used in audit events and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::DeadmanSwitch { .. } => "deadman_switch",
            Self::TrustedQuorum { .. } => "trusted_quorum",
            Self::OracleVerified { .. } => "oracle_verified",
        }
    }

    /// Validate configuration parameters at configure time.
    pub fn validate(&self) -> Result<(), TriggerError> {
        match self {
            Self::DeadmanSwitch { interval_days, .. } => {
                if *interval_days < MIN_DEADMAN_INTERVAL_DAYS {
                    return Err(TriggerError::IntervalTooShort {
                        days: *interval_days,
                        min: MIN_DEADMAN_INTERVAL_DAYS,
                    });
                }
                Ok(())
            }
            Self::TrustedQuorum {
                signers, threshold, ..
            } => {
                if signers.len() < MIN_QUORUM_THRESHOLD as usize {
                    return Err(TriggerError::InvalidQuorum(format!(
                        "{} signers, need at least {}",
                        signers.len(),
                        MIN_QUORUM_THRESHOLD
                    )));
                }
                if signers.len() > MAX_SIGNERS {
                    return Err(TriggerError::InvalidQuorum(format!(
                        "{} signers exceeds maximum {}",
                        signers.len(),
                        MAX_SIGNERS
                    )));
                }
                let mut dedup = signers.clone();
                dedup.sort();
                dedup.dedup();
                if dedup.len() != signers.len() {
                    return Err(TriggerError::InvalidQuorum("duplicate signer".into()));
                }
                if *threshold < MIN_QUORUM_THRESHOLD || *threshold as usize > signers.len() {
                    return Err(TriggerError::InvalidQuorum(format!(
                        "threshold {} outside {}..={}",
                        threshold,
                        MIN_QUORUM_THRESHOLD,
                        signers.len()
                    )));
                }
                Ok(())
            }
            Self::OracleVerified {
                event_type,
                provider,
                ..
            } => {
                if event_type.is_empty() || provider.is_empty() {
                    return Err(TriggerError::Validation(
                        "oracle event type and provider must not be empty".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Trigger lifecycle: `Configured -> Triggered`, one way. A creator with
/// no record at all is in the implicit Unconfigured state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TriggerState {
    Configured(TriggerMode),
    /// Terminal. The mode is retained read-only for audit.
    Triggered { mode: TriggerMode, at: Timestamp },
}

impl TriggerState {
    pub fn triggered(&self) -> bool {
        matches!(self, Self::Triggered { .. })
    }

    /// The configured mode, whichever side of the transition we are on.
    pub fn mode(&self) -> &TriggerMode {
        match self {
            Self::Configured(mode) => mode,
            Self::Triggered { mode, .. } => mode,
        }
    }
}

/// Per-creator trigger record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub creator: ActorId,
    pub state: TriggerState,
    pub configured_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadman_interval_floor() {
        let mode = TriggerMode::DeadmanSwitch {
            interval_days: 29,
            last_check_in: Timestamp::genesis(),
        };
        assert!(matches!(
            mode.validate(),
            Err(TriggerError::IntervalTooShort { days: 29, min: 30 })
        ));

        let ok = TriggerMode::DeadmanSwitch {
            interval_days: 30,
            last_check_in: Timestamp::genesis(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn quorum_bounds() {
        let signers: Vec<ActorId> = (0..3).map(|_| ActorId::new()).collect();

        let ok = TriggerMode::TrustedQuorum {
            signers: signers.clone(),
            threshold: 2,
            submitted: BTreeMap::new(),
        };
        assert!(ok.validate().is_ok());

        let too_high = TriggerMode::TrustedQuorum {
            signers: signers.clone(),
            threshold: 4,
            submitted: BTreeMap::new(),
        };
        assert!(too_high.validate().is_err());

        let too_low = TriggerMode::TrustedQuorum {
            signers: signers.clone(),
            threshold: 1,
            submitted: BTreeMap::new(),
        };
        assert!(too_low.validate().is_err());

        let lone = TriggerMode::TrustedQuorum {
            signers: vec![ActorId::new()],
            threshold: 2,
            submitted: BTreeMap::new(),
        };
        assert!(lone.validate().is_err());
    }

    #[test]
    fn quorum_rejects_duplicates_and_oversize() {
        let dup = ActorId::new();
        let mode = TriggerMode::TrustedQuorum {
            signers: vec![dup, dup],
            threshold: 2,
            submitted: BTreeMap::new(),
        };
        assert!(mode.validate().is_err());

        let crowd: Vec<ActorId> = (0..21).map(|_| ActorId::new()).collect();
        let mode = TriggerMode::TrustedQuorum {
            signers: crowd,
            threshold: 2,
            submitted: BTreeMap::new(),
        };
        assert!(mode.validate().is_err());
    }

    #[test]
    fn mode_tags() {
        let mode = TriggerMode::OracleVerified {
            event_type: "death_certificate".into(),
            data_digest: Digest::zero(),
            provider: "registry".into(),
        };
        assert_eq!(mode.tag(), "oracle_verified");
        assert!(mode.validate().is_ok());
    }
}

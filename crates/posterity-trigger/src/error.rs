use thiserror::Error;

use posterity_intent::IntentError;
use posterity_platform::StoreError;
use posterity_types::ActorId;

/// Errors from the trigger engine.
#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("no trigger configured for creator: {0}")]
    NotConfigured(ActorId),

    #[error("trigger already fired; configuration is immutable")]
    AlreadyTriggered,

    #[error("operation requires the {expected} mode")]
    WrongMode { expected: &'static str },

    #[error("check-in interval of {days} days below minimum {min}")]
    IntervalTooShort { days: u64, min: u64 },

    #[error("invalid quorum: {0}")]
    InvalidQuorum(String),

    #[error("{0} is not a quorum signer")]
    NotASigner(ActorId),

    #[error("signer {0} already submitted a signature")]
    AlreadySigned(ActorId),

    #[error("check-in still fresh; {remaining_secs}s until the switch arms")]
    CheckInTooRecent { remaining_secs: i64 },

    #[error("quorum not reached: {collected} of {threshold} signatures")]
    QuorumNotReached { collected: u32, threshold: u32 },

    #[error("oracle has not confirmed the event: {0}")]
    OracleNotConfirmed(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("intent error: {0}")]
    Intent(#[from] IntentError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

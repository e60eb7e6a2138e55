use thiserror::Error;

use posterity_platform::StoreError;
use posterity_types::ActorId;

/// Errors from the intent store.
#[derive(Error, Debug)]
pub enum IntentError {
    #[error("corpus window span of {span} years outside allowed {min}..={max}")]
    InvalidCorpusWindow { span: i32, min: i32, max: i32 },

    #[error("goal priority {0} outside 1..=100")]
    InvalidPriority(u8),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("goal limit reached ({0})")]
    GoalLimit(usize),

    #[error("asset reference limit reached ({0})")]
    AssetRefLimit(usize),

    #[error("no intent captured for creator: {0}")]
    NotFound(ActorId),

    #[error("intent already captured for creator: {0}")]
    AlreadyCaptured(ActorId),

    #[error("intent already triggered; mutation unavailable")]
    AlreadyTriggered,

    #[error("intent already revoked; mutation unavailable")]
    AlreadyRevoked,

    #[error("caller {caller} is not the creator {creator}")]
    NotCreator { caller: ActorId, creator: ActorId },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

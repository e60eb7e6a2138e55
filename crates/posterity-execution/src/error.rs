use thiserror::Error;

use posterity_platform::StoreError;
use posterity_types::ActorId;

/// Hard rejections from the execution engine.
///
/// Policy-gated inaction is deliberately NOT here: a held gate is an `Ok`
/// outcome (`Outcome::Inaction`), observable in the audit log, never an
/// abort of the caller's workflow.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("unknown creator: {0}")]
    UnknownCreator(ActorId),

    #[error("execution is not active for creator: {0}")]
    NotActive(ActorId),

    #[error("intent has not triggered for creator: {0}")]
    NotTriggered(ActorId),

    #[error("execution already active for creator: {0}")]
    AlreadyActive(ActorId),

    #[error("active window has not elapsed; {remaining_secs}s remain")]
    SunsetNotReached { remaining_secs: i64 },

    #[error("execution already sunset for creator: {0}")]
    AlreadySunset(ActorId),

    #[error("insufficient treasury: required {required}, available {available}")]
    InsufficientTreasury { required: u64, available: u64 },

    #[error("execution log is full ({0} entries)")]
    LogFull(usize),

    #[error("license limit reached ({0})")]
    LicenseLimit(usize),

    #[error("caller {0} lacks the required capability")]
    Unauthorized(ActorId),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

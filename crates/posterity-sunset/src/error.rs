use thiserror::Error;

use posterity_execution::ExecutionError;
use posterity_platform::StoreError;
use posterity_types::limits::MAX_ARCHIVE_BATCH;
use posterity_types::ActorId;

use crate::record::SunsetPhase;

/// Rejections from the sunset pipeline. Every one leaves state untouched.
#[derive(Error, Debug)]
pub enum SunsetError {
    #[error("no sunset record for creator: {0}")]
    NotInitiated(ActorId),

    #[error("sunset already initiated for creator: {0}")]
    AlreadyInitiated(ActorId),

    #[error("active window has not elapsed; {remaining_secs}s remain")]
    TooEarly { remaining_secs: i64 },

    #[error("phase violation: expected {expected}, actual {actual}")]
    PhaseViolation {
        expected: SunsetPhase,
        actual: SunsetPhase,
    },

    #[error("archive batch must contain 1..={MAX_ARCHIVE_BATCH} assets, got {0}")]
    BadBatchSize(usize),

    #[error("caller {0} lacks the required capability")]
    Unauthorized(ActorId),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

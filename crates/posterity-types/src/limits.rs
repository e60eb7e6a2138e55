//! Fixed bounds for every bounded collection and window in the system.
//!
//! All of these are compile-time constants. None is configurable per
//! instance: the system's "no drift, no expansion" property depends on
//! these being fixed at construction.

/// Maximum goals per creator.
pub const MAX_GOALS: usize = 20;

/// Maximum asset references per intent record.
pub const MAX_ASSET_REFS: usize = 100;

/// Maximum signers in a trusted quorum.
pub const MAX_SIGNERS: usize = 20;

/// Minimum quorum threshold (a single signer is not a quorum).
pub const MIN_QUORUM_THRESHOLD: u32 = 2;

/// Maximum execution-log entries per creator.
pub const MAX_EXECUTION_LOG: usize = 1_000;

/// Maximum licenses issued per creator.
pub const MAX_LICENSES: usize = 100;

/// Maximum assets per archive batch during sunset.
pub const MAX_ARCHIVE_BATCH: usize = 50;

/// Maximum classifiable text length in bytes; longer input is rejected
/// outright as a cost-exhaustion defense.
pub const MAX_CLASSIFY_LEN: usize = 10_000;

/// Corpus window span bounds, inclusive, in years.
pub const MIN_CORPUS_SPAN_YEARS: i32 = 5;
pub const MAX_CORPUS_SPAN_YEARS: i32 = 10;

/// Minimum dead-man-switch check-in interval, in days.
pub const MIN_DEADMAN_INTERVAL_DAYS: u64 = 30;

/// Length of the execution window, after which sunset becomes mandatory.
pub const ACTIVE_WINDOW_DAYS: i64 = 20 * 365;

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use posterity_types::ActorId;

/// Errors from the record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no record for creator: {0}")]
    NotFound(ActorId),

    #[error("record already exists for creator: {0}")]
    AlreadyExists(ActorId),

    #[error("version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },
}

/// A record together with its platform-assigned version.
#[derive(Clone, Debug)]
pub struct Versioned<T> {
    pub version: u64,
    pub record: T,
}

/// Durable, per-creator record storage with atomic compare-and-set.
///
/// Each creator owns at most one record of each type. Concurrent mutating
/// calls on one record are serialized by the version check: the loser of a
/// race gets `VersionConflict`, re-reads, and observes the winner's state.
pub trait RecordStore<T>: Send + Sync {
    /// Fetch the current record and version for a creator, if any.
    fn get(&self, creator: &ActorId) -> Option<Versioned<T>>;

    /// Create the record for a creator. Fails if one already exists.
    fn insert(&self, creator: &ActorId, record: T) -> Result<(), StoreError>;

    /// Replace the record iff the stored version equals `expected_version`.
    /// Returns the new version on success.
    fn compare_and_set(
        &self,
        creator: &ActorId,
        expected_version: u64,
        record: T,
    ) -> Result<u64, StoreError>;
}

/// In-memory record store.
pub struct MemoryStore<T> {
    records: RwLock<HashMap<ActorId, Versioned<T>>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> RecordStore<T> for MemoryStore<T> {
    fn get(&self, creator: &ActorId) -> Option<Versioned<T>> {
        self.records.read().unwrap().get(creator).cloned()
    }

    fn insert(&self, creator: &ActorId, record: T) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap();
        if records.contains_key(creator) {
            return Err(StoreError::AlreadyExists(*creator));
        }
        records.insert(*creator, Versioned { version: 1, record });
        Ok(())
    }

    fn compare_and_set(
        &self,
        creator: &ActorId,
        expected_version: u64,
        record: T,
    ) -> Result<u64, StoreError> {
        let mut records = self.records.write().unwrap();
        let slot = records
            .get_mut(creator)
            .ok_or(StoreError::NotFound(*creator))?;

        if slot.version != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: slot.version,
            });
        }

        slot.version += 1;
        slot.record = record;
        Ok(slot.version)
    }
}

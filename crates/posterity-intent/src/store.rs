use std::sync::Arc;

use tracing::{debug, info};

use posterity_platform::{AuditLog, Clock, RecordStore, StoreError, Versioned};
use posterity_types::limits::{MAX_ASSET_REFS, MAX_GOALS};
use posterity_types::{ActorId, AuditEvent, Digest, Timestamp};

use crate::error::IntentError;
use crate::record::{AssetRef, CorpusWindow, Goal, IntentRecord};
use crate::record::IntentLifecycle;

/// Parameters for capturing an intent.
#[derive(Clone, Debug)]
pub struct CaptureRequest {
    pub intent_digest: Digest,
    pub corpus_digest: Digest,
    pub corpus_locator: String,
    pub asset_locator: Option<String>,
    pub corpus_window: CorpusWindow,
}

/// Owns intent records and their capture/revoke lifecycle.
///
/// Every mutating operation authenticates the caller against the record's
/// creator; the trigger edge alone is driven by the TriggerEngine on the
/// winning fire.
pub struct IntentStore {
    records: Arc<dyn RecordStore<IntentRecord>>,
    audit: Arc<AuditLog>,
    clock: Arc<dyn Clock>,
}

impl IntentStore {
    pub fn new(
        records: Arc<dyn RecordStore<IntentRecord>>,
        audit: Arc<AuditLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            records,
            audit,
            clock,
        }
    }

    /// Capture a creator's intent. One record per creator, ever: a revoked
    /// record blocks re-capture, by design.
    pub fn capture(&self, caller: ActorId, request: CaptureRequest) -> Result<(), IntentError> {
        request.corpus_window.validate()?;
        if request.corpus_locator.is_empty() {
            return Err(IntentError::Validation("corpus locator must not be empty".into()));
        }

        let now = self.clock.now();
        let record = IntentRecord {
            creator: caller,
            intent_digest: request.intent_digest,
            corpus_digest: request.corpus_digest,
            corpus_locator: request.corpus_locator,
            asset_locator: request.asset_locator,
            corpus_window: request.corpus_window,
            revision: 1,
            goals: Vec::new(),
            asset_refs: Vec::new(),
            lifecycle: IntentLifecycle::Active,
            created_at: now,
        };

        self.records.insert(&caller, record).map_err(|e| match e {
            StoreError::AlreadyExists(creator) => IntentError::AlreadyCaptured(creator),
            other => IntentError::Store(other),
        })?;

        info!(creator = %caller, "intent captured");
        self.audit.append(AuditEvent::IntentCaptured {
            creator: caller,
            at: now,
        });
        Ok(())
    }

    /// Add a goal to the creator's intent. Bounded; priority 1..=100.
    pub fn add_goal(&self, caller: ActorId, goal: Goal) -> Result<(), IntentError> {
        if goal.priority < 1 || goal.priority > 100 {
            return Err(IntentError::InvalidPriority(goal.priority));
        }
        if goal.description.is_empty() {
            return Err(IntentError::Validation("goal description must not be empty".into()));
        }

        let priority = goal.priority;
        self.mutate(caller, caller, move |record| {
            record.lifecycle.mutable()?;
            if record.goals.len() >= MAX_GOALS {
                return Err(IntentError::GoalLimit(MAX_GOALS));
            }
            record.goals.push(goal.clone());
            Ok(())
        })?;

        self.audit.append(AuditEvent::GoalAdded {
            creator: caller,
            priority,
            at: self.clock.now(),
        });
        Ok(())
    }

    /// Deactivate a goal by index without removing it from the record.
    pub fn deactivate_goal(&self, caller: ActorId, index: usize) -> Result<(), IntentError> {
        self.mutate(caller, caller, move |record| {
            record.lifecycle.mutable()?;
            let goal = record
                .goals
                .get_mut(index)
                .ok_or_else(|| IntentError::Validation(format!("no goal at index {index}")))?;
            goal.active = false;
            Ok(())
        })
    }

    /// Reference an asset from the intent. Bounded.
    pub fn add_asset_ref(&self, caller: ActorId, asset: AssetRef) -> Result<(), IntentError> {
        if asset.0.is_empty() {
            return Err(IntentError::Validation("asset reference must not be empty".into()));
        }
        self.mutate(caller, caller, move |record| {
            record.lifecycle.mutable()?;
            if record.asset_refs.len() >= MAX_ASSET_REFS {
                return Err(IntentError::AssetRefLimit(MAX_ASSET_REFS));
            }
            record.asset_refs.push(asset.clone());
            Ok(())
        })
    }

    /// Revoke the intent. `Active -> Revoked` only: once triggered, this
    /// always fails.
    pub fn revoke(&self, caller: ActorId) -> Result<(), IntentError> {
        let now = self.clock.now();
        self.mutate(caller, caller, move |record| {
            record.lifecycle = record.lifecycle.revoke(now)?;
            Ok(())
        })?;

        info!(creator = %caller, "intent revoked");
        self.audit.append(AuditEvent::IntentRevoked {
            creator: caller,
            at: now,
        });
        Ok(())
    }

    /// Mark the intent triggered. Called by the TriggerEngine on the
    /// winning fire only; not caller-authenticated for that reason.
    pub fn mark_triggered(&self, creator: ActorId, at: Timestamp) -> Result<(), IntentError> {
        self.mutate(creator, creator, move |record| {
            record.lifecycle = record.lifecycle.trigger(at)?;
            Ok(())
        })?;
        debug!(creator = %creator, "intent marked triggered");
        Ok(())
    }

    /// Read-only view of the creator's record.
    pub fn get(&self, creator: &ActorId) -> Result<IntentRecord, IntentError> {
        self.records
            .get(creator)
            .map(|v| v.record)
            .ok_or(IntentError::NotFound(*creator))
    }

    /// Read-modify-compare-and-set. Retries on version conflict, which
    /// re-runs the precondition closure against the winner's state, so a
    /// losing writer can only succeed if its operation is still legal.
    fn mutate<F>(&self, caller: ActorId, creator: ActorId, mut op: F) -> Result<(), IntentError>
    where
        F: FnMut(&mut IntentRecord) -> Result<(), IntentError>,
    {
        loop {
            let Versioned { version, record } = self
                .records
                .get(&creator)
                .ok_or(IntentError::NotFound(creator))?;

            if record.creator != caller {
                return Err(IntentError::NotCreator {
                    caller,
                    creator: record.creator,
                });
            }

            let mut updated = record;
            op(&mut updated)?;
            updated.revision += 1;

            match self.records.compare_and_set(&creator, version, updated) {
                Ok(_) => return Ok(()),
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(other) => return Err(IntentError::Store(other)),
            }
        }
    }
}

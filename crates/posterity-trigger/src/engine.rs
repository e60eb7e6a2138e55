use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use posterity_intent::IntentStore;
use posterity_platform::{AuditLog, Clock, RecordStore, StoreError, Versioned};
use posterity_types::{ActorId, AuditEvent, Timestamp};

use crate::config::{TriggerMode, TriggerRecord, TriggerState};
use crate::error::TriggerError;
use crate::observer::TriggerObserver;
use crate::provider::TriggerVerification;

/// Resolves one of three trigger modes into the one-way `Triggered`
/// transition.
///
/// Firing is racy by nature — heirs, signers, and watchdogs may all call
/// `fire` at once. Exactly one caller wins the compare-and-set; every
/// other caller observes the post-state and gets `AlreadyTriggered` with
/// no further side effects.
pub struct TriggerEngine {
    records: Arc<dyn RecordStore<TriggerRecord>>,
    intents: Arc<IntentStore>,
    verifier: Arc<dyn TriggerVerification>,
    observers: Vec<Arc<dyn TriggerObserver>>,
    audit: Arc<AuditLog>,
    clock: Arc<dyn Clock>,
}

impl TriggerEngine {
    pub fn new(
        records: Arc<dyn RecordStore<TriggerRecord>>,
        intents: Arc<IntentStore>,
        verifier: Arc<dyn TriggerVerification>,
        observers: Vec<Arc<dyn TriggerObserver>>,
        audit: Arc<AuditLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            records,
            intents,
            verifier,
            observers,
            audit,
            clock,
        }
    }

    /// Configure (or reconfigure) the creator's trigger. Reconfiguration
    /// is allowed any time before the fire; afterwards the configuration
    /// is immutable.
    pub fn configure(&self, caller: ActorId, mode: TriggerMode) -> Result<(), TriggerError> {
        mode.validate()?;

        // A fired trigger is immutable; classify that before consulting
        // the intent, which at that point reports a lifecycle error of
        // its own.
        let existing = self.records.get(&caller);
        if let Some(Versioned { record, .. }) = &existing {
            if record.state.triggered() {
                return Err(TriggerError::AlreadyTriggered);
            }
        }

        // An intent must exist and still be active; a revoked intent has
        // nothing left to trigger.
        let intent = self.intents.get(&caller)?;
        intent.lifecycle.mutable().map_err(TriggerError::Intent)?;

        let now = self.clock.now();
        let tag = mode.tag();

        match existing {
            None => {
                let record = TriggerRecord {
                    creator: caller,
                    state: TriggerState::Configured(mode),
                    configured_at: now,
                };
                self.records.insert(&caller, record)?;
            }
            Some(Versioned { version, .. }) => {
                let updated = TriggerRecord {
                    creator: caller,
                    state: TriggerState::Configured(mode),
                    configured_at: now,
                };
                self.records.compare_and_set(&caller, version, updated)?;
            }
        }

        info!(creator = %caller, mode = tag, "trigger configured");
        self.audit.append(AuditEvent::TriggerConfigured {
            creator: caller,
            mode: tag.into(),
            at: now,
        });
        Ok(())
    }

    /// Dead-man switch: reset the liveness timestamp.
    pub fn check_in(&self, caller: ActorId) -> Result<(), TriggerError> {
        let now = self.clock.now();
        self.mutate(caller, |record| match &mut record.state {
            TriggerState::Configured(TriggerMode::DeadmanSwitch { last_check_in, .. }) => {
                *last_check_in = now;
                Ok(())
            }
            TriggerState::Configured(_) => Err(TriggerError::WrongMode {
                expected: "deadman_switch",
            }),
            TriggerState::Triggered { .. } => Err(TriggerError::AlreadyTriggered),
        })?;

        debug!(creator = %caller, "dead-man check-in");
        self.audit.append(AuditEvent::CheckIn {
            creator: caller,
            at: now,
        });
        Ok(())
    }

    /// Trusted quorum: record one signer's attestation. Idempotency is
    /// strict: a resubmission is rejected and changes nothing.
    pub fn submit_signature(
        &self,
        signer: ActorId,
        creator: ActorId,
    ) -> Result<u32, TriggerError> {
        let now = self.clock.now();
        let mut collected = 0u32;
        self.mutate(creator, |record| match &mut record.state {
            TriggerState::Configured(TriggerMode::TrustedQuorum {
                signers, submitted, ..
            }) => {
                if !signers.contains(&signer) {
                    return Err(TriggerError::NotASigner(signer));
                }
                if submitted.contains_key(&signer) {
                    return Err(TriggerError::AlreadySigned(signer));
                }
                submitted.insert(signer, now);
                collected = submitted.len() as u32;
                Ok(())
            }
            TriggerState::Configured(_) => Err(TriggerError::WrongMode {
                expected: "trusted_quorum",
            }),
            TriggerState::Triggered { .. } => Err(TriggerError::AlreadyTriggered),
        })?;

        info!(creator = %creator, signer = %signer, collected, "quorum signature submitted");
        self.audit.append(AuditEvent::SignatureSubmitted {
            creator,
            signer,
            collected,
            at: now,
        });
        Ok(collected)
    }

    /// Attempt the one-way fire. Any party may call this; the mode's
    /// condition decides, and the compare-and-set decides races.
    pub fn fire(&self, caller: ActorId, creator: ActorId) -> Result<Timestamp, TriggerError> {
        loop {
            let Versioned { version, record } = self
                .records
                .get(&creator)
                .ok_or(TriggerError::NotConfigured(creator))?;

            let mode = match record.state {
                TriggerState::Triggered { .. } => return Err(TriggerError::AlreadyTriggered),
                TriggerState::Configured(mode) => mode,
            };

            // A revoked intent can never fire.
            let intent = self.intents.get(&creator)?;
            intent.lifecycle.mutable().map_err(TriggerError::Intent)?;

            let now = self.clock.now();
            self.condition_met(&creator, &mode, now)?;

            let tag = mode.tag();
            let updated = TriggerRecord {
                creator,
                state: TriggerState::Triggered { mode, at: now },
                configured_at: record.configured_at,
            };

            match self.records.compare_and_set(&creator, version, updated) {
                Ok(_) => {
                    info!(creator = %creator, caller = %caller, mode = tag, "trigger fired");
                    self.intents.mark_triggered(creator, now)?;
                    self.audit.append(AuditEvent::Triggered {
                        creator,
                        mode: tag.into(),
                        at: now,
                    });
                    for observer in &self.observers {
                        observer.on_triggered(creator, now);
                    }
                    return Ok(now);
                }
                Err(StoreError::VersionConflict { .. }) => {
                    // Lost the race; re-read and report the post-state.
                    debug!(creator = %creator, caller = %caller, "fire lost the race, re-reading");
                    continue;
                }
                Err(other) => return Err(TriggerError::Store(other)),
            }
        }
    }

    /// Read-only view of the creator's trigger record.
    pub fn get(&self, creator: &ActorId) -> Result<TriggerRecord, TriggerError> {
        self.records
            .get(creator)
            .map(|v| v.record)
            .ok_or(TriggerError::NotConfigured(*creator))
    }

    /// Evaluate the mode's firing condition at `now`.
    fn condition_met(
        &self,
        creator: &ActorId,
        mode: &TriggerMode,
        now: Timestamp,
    ) -> Result<(), TriggerError> {
        match mode {
            TriggerMode::DeadmanSwitch {
                interval_days,
                last_check_in,
            } => {
                let interval = Duration::days(*interval_days as i64);
                let silent_for = now.since(*last_check_in);
                if silent_for < interval {
                    return Err(TriggerError::CheckInTooRecent {
                        remaining_secs: (interval - silent_for).num_seconds(),
                    });
                }
                Ok(())
            }
            TriggerMode::TrustedQuorum {
                threshold,
                submitted,
                ..
            } => {
                let collected = submitted.len() as u32;
                if collected < *threshold {
                    return Err(TriggerError::QuorumNotReached {
                        collected,
                        threshold: *threshold,
                    });
                }
                Ok(())
            }
            TriggerMode::OracleVerified {
                event_type,
                data_digest,
                ..
            } => {
                let status = self.verifier.check(creator, event_type, data_digest);
                if !status.confirms() {
                    warn!(creator = %creator, status = %status, "oracle did not confirm");
                    return Err(TriggerError::OracleNotConfirmed(status.to_string()));
                }
                Ok(())
            }
        }
    }

    /// Read-modify-compare-and-set on the trigger record, retrying version
    /// conflicts with preconditions re-checked against the winner's state.
    fn mutate<F>(&self, creator: ActorId, mut op: F) -> Result<(), TriggerError>
    where
        F: FnMut(&mut TriggerRecord) -> Result<(), TriggerError>,
    {
        loop {
            let Versioned { version, record } = self
                .records
                .get(&creator)
                .ok_or(TriggerError::NotConfigured(creator))?;

            let mut updated = record;
            op(&mut updated)?;

            match self.records.compare_and_set(&creator, version, updated) {
                Ok(_) => return Ok(()),
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(other) => return Err(TriggerError::Store(other)),
            }
        }
    }
}

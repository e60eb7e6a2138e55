use std::sync::Arc;

use tracing::{info, warn};

use posterity_classifier::Classifier;
use posterity_intent::IntentStore;
use posterity_platform::{AuditLog, CapabilityAuthority, Clock, RecordStore, StoreError, Versioned};
use posterity_types::limits::{MAX_EXECUTION_LOG, MAX_LICENSES};
use posterity_types::{
    ActorId, AuditEvent, CapabilityId, Confidence, Digest, InactionReason, LicenseId, Timestamp,
    CAP_OPERATOR,
};

use crate::error::ExecutionError;
use crate::record::{ExecutionLogEntry, ExecutionPhase, ExecutionRecord, License};
use crate::resolver::Resolver;

/// Result of a gated operation that was allowed to run its gate.
///
/// Inaction is a first-class outcome: the gate held, nothing mutated, and
/// an audit entry records why. It is NOT an error; callers distinguish it
/// from hard rejections by the `Ok` wrapping.
#[derive(Clone, Debug)]
pub enum Outcome {
    Executed { entry: ExecutionLogEntry },
    Inaction { reason: InactionReason },
}

impl Outcome {
    pub fn executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }

    pub fn is_inaction(&self) -> bool {
        matches!(self, Self::Inaction { .. })
    }
}

/// Internal gate decision, before any mutation.
enum Gate {
    Cleared { citation: String, confidence: u8 },
    Held(InactionReason),
}

/// Executes pre-authorized actions during the active window, behind a
/// uniform two-part gate.
///
/// Every gated operation passes or fails the same gate: the resolver must
/// report confidence at or above the execution threshold against the
/// creator's frozen corpus, and the content classifier must not prohibit
/// the action description. Either failure produces `Outcome::Inaction`
/// plus an audit entry, never a partial mutation.
pub struct ExecutionEngine {
    records: Arc<dyn RecordStore<ExecutionRecord>>,
    intents: Arc<IntentStore>,
    classifier: Classifier,
    resolver: Arc<dyn Resolver>,
    authority: Arc<dyn CapabilityAuthority>,
    audit: Arc<AuditLog>,
    clock: Arc<dyn Clock>,
}

impl ExecutionEngine {
    pub fn new(
        records: Arc<dyn RecordStore<ExecutionRecord>>,
        intents: Arc<IntentStore>,
        resolver: Arc<dyn Resolver>,
        authority: Arc<dyn CapabilityAuthority>,
        audit: Arc<AuditLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            records,
            intents,
            classifier: Classifier::new(),
            resolver,
            authority,
            audit,
            clock,
        }
    }

    // ── Treasury ──

    /// Deposit into a creator's treasury. Ungated and open to any caller:
    /// funding a legacy needs no capability, only a captured intent.
    /// Lazily creates the dormant execution record on first deposit.
    /// Returns the new balance.
    pub fn deposit(
        &self,
        depositor: ActorId,
        creator: ActorId,
        amount_minor: u64,
    ) -> Result<u64, ExecutionError> {
        if amount_minor == 0 {
            return Err(ExecutionError::Validation(
                "deposit amount must be positive".into(),
            ));
        }
        self.intents
            .get(&creator)
            .map_err(|_| ExecutionError::UnknownCreator(creator))?;

        let balance = loop {
            match self.records.get(&creator) {
                None => {
                    let mut record = ExecutionRecord::dormant(creator);
                    record.treasury_minor = amount_minor;
                    match self.records.insert(&creator, record) {
                        Ok(()) => break amount_minor,
                        Err(StoreError::AlreadyExists(_)) => continue,
                        Err(other) => return Err(ExecutionError::Store(other)),
                    }
                }
                Some(Versioned { version, record }) => {
                    let mut updated = record;
                    updated.treasury_minor = updated
                        .treasury_minor
                        .checked_add(amount_minor)
                        .ok_or_else(|| {
                            ExecutionError::Validation("treasury balance overflow".into())
                        })?;
                    let balance = updated.treasury_minor;
                    match self.records.compare_and_set(&creator, version, updated) {
                        Ok(_) => break balance,
                        Err(StoreError::VersionConflict { .. }) => continue,
                        Err(other) => return Err(ExecutionError::Store(other)),
                    }
                }
            }
        };

        info!(creator = %creator, depositor = %depositor, amount_minor, "treasury deposit");
        self.audit.append(AuditEvent::TreasuryDeposit {
            creator,
            amount_minor,
            at: self.clock.now(),
        });
        Ok(balance)
    }

    // ── Lifecycle ──

    /// `Dormant -> Active`, legal only after the creator's intent has
    /// triggered. Driven by the trigger pipeline, not by operators, so no
    /// capability check applies. Idempotent callers get `AlreadyActive`.
    pub fn activate(&self, creator: ActorId, at: Timestamp) -> Result<(), ExecutionError> {
        let intent = self
            .intents
            .get(&creator)
            .map_err(|_| ExecutionError::UnknownCreator(creator))?;
        if !intent.lifecycle.triggered() {
            return Err(ExecutionError::NotTriggered(creator));
        }

        self.ensure_record(creator)?;
        self.mutate(creator, |record| {
            record.phase = record.phase.activate(creator, at)?;
            Ok(())
        })?;

        info!(creator = %creator, "execution activated");
        self.audit
            .append(AuditEvent::ExecutionActivated { creator, at });
        Ok(())
    }

    /// `Active -> Sunset` once the twenty-year window has elapsed
    /// (inclusive at the boundary). All gated operations halt forever.
    /// Returns the recorded sunset time.
    pub fn begin_sunset(&self, creator: ActorId) -> Result<Timestamp, ExecutionError> {
        let now = self.clock.now();
        self.mutate(creator, |record| {
            record.phase = record.phase.sunset(creator, now)?;
            Ok(())
        })?;
        info!(creator = %creator, "execution sunset");
        Ok(now)
    }

    // ── Gated operations ──

    /// Execute one pre-authorized action, appending it to the execution
    /// log when the gate clears.
    pub fn execute_action(
        &self,
        operator: ActorId,
        creator: ActorId,
        action_key: &str,
        description: &str,
    ) -> Result<Outcome, ExecutionError> {
        let (citation, confidence) =
            match self.evaluate_gate(operator, creator, action_key, description)? {
                Gate::Held(reason) => return Ok(self.hold(creator, action_key, reason)),
                Gate::Cleared {
                    citation,
                    confidence,
                } => (citation, confidence),
            };

        let entry = self.append_log(creator, action_key, citation, confidence)?;
        self.audit.append(AuditEvent::ActionExecuted {
            creator,
            action_key: action_key.to_string(),
            confidence,
            at: entry.at,
        });
        Ok(Outcome::Executed { entry })
    }

    /// Issue a license over the creator's works. Gated like any action.
    pub fn issue_license(
        &self,
        operator: ActorId,
        creator: ActorId,
        action_key: &str,
        description: &str,
        licensee: ActorId,
        terms_digest: Digest,
        royalty_bps: u16,
    ) -> Result<Outcome, ExecutionError> {
        if royalty_bps > 10_000 {
            return Err(ExecutionError::Validation(format!(
                "royalty {royalty_bps} bps exceeds 10000"
            )));
        }

        let (citation, confidence) =
            match self.evaluate_gate(operator, creator, action_key, description)? {
                Gate::Held(reason) => return Ok(self.hold(creator, action_key, reason)),
                Gate::Cleared {
                    citation,
                    confidence,
                } => (citation, confidence),
            };

        let now = self.clock.now();
        let license = License {
            id: LicenseId::new(),
            licensee,
            terms_digest,
            royalty_bps,
            issued_at: now,
        };
        let license_id = license.id;
        let entry = ExecutionLogEntry {
            action_key: action_key.to_string(),
            citation,
            confidence,
            at: now,
        };
        {
            let entry = entry.clone();
            let license = license.clone();
            self.mutate(creator, move |record| {
                Self::require_active(creator, &record.phase)?;
                if record.log.len() >= MAX_EXECUTION_LOG {
                    return Err(ExecutionError::LogFull(MAX_EXECUTION_LOG));
                }
                if record.licenses.len() >= MAX_LICENSES {
                    return Err(ExecutionError::LicenseLimit(MAX_LICENSES));
                }
                record.log.push(entry.clone());
                record.licenses.push(license.clone());
                Ok(())
            })?;
        }

        info!(creator = %creator, license = %license_id, licensee = %licensee, "license issued");
        self.audit.append(AuditEvent::LicenseIssued {
            creator,
            license: license_id,
            licensee,
            at: now,
        });
        Ok(Outcome::Executed { entry })
    }

    /// Fund an external project from the treasury. The debit is
    /// all-or-nothing: insufficient funds is a hard error, not inaction.
    pub fn fund_project(
        &self,
        operator: ActorId,
        creator: ActorId,
        action_key: &str,
        description: &str,
        recipient: ActorId,
        amount_minor: u64,
    ) -> Result<Outcome, ExecutionError> {
        if amount_minor == 0 {
            return Err(ExecutionError::Validation(
                "funding amount must be positive".into(),
            ));
        }

        let (citation, confidence) =
            match self.evaluate_gate(operator, creator, action_key, description)? {
                Gate::Held(reason) => return Ok(self.hold(creator, action_key, reason)),
                Gate::Cleared {
                    citation,
                    confidence,
                } => (citation, confidence),
            };

        let now = self.clock.now();
        let entry = ExecutionLogEntry {
            action_key: action_key.to_string(),
            citation,
            confidence,
            at: now,
        };
        {
            let entry = entry.clone();
            self.mutate(creator, move |record| {
                Self::require_active(creator, &record.phase)?;
                if record.log.len() >= MAX_EXECUTION_LOG {
                    return Err(ExecutionError::LogFull(MAX_EXECUTION_LOG));
                }
                if record.treasury_minor < amount_minor {
                    return Err(ExecutionError::InsufficientTreasury {
                        required: amount_minor,
                        available: record.treasury_minor,
                    });
                }
                record.treasury_minor -= amount_minor;
                record.log.push(entry.clone());
                Ok(())
            })?;
        }

        info!(creator = %creator, recipient = %recipient, amount_minor, "project funded");
        self.audit.append(AuditEvent::ProjectFunded {
            creator,
            recipient,
            amount_minor,
            at: now,
        });
        Ok(Outcome::Executed { entry })
    }

    /// Distribute revenue to a set of recipients. All transfers apply
    /// atomically or none do: the total is checked against the treasury
    /// before any debit.
    pub fn distribute_revenue(
        &self,
        operator: ActorId,
        creator: ActorId,
        action_key: &str,
        description: &str,
        shares: &[(ActorId, u64)],
    ) -> Result<Outcome, ExecutionError> {
        if shares.is_empty() {
            return Err(ExecutionError::Validation(
                "distribution must name at least one recipient".into(),
            ));
        }
        let mut total_minor: u64 = 0;
        for (_, amount) in shares {
            if *amount == 0 {
                return Err(ExecutionError::Validation(
                    "distribution shares must be positive".into(),
                ));
            }
            total_minor = total_minor
                .checked_add(*amount)
                .ok_or_else(|| ExecutionError::Validation("distribution total overflow".into()))?;
        }

        let (citation, confidence) =
            match self.evaluate_gate(operator, creator, action_key, description)? {
                Gate::Held(reason) => return Ok(self.hold(creator, action_key, reason)),
                Gate::Cleared {
                    citation,
                    confidence,
                } => (citation, confidence),
            };

        let now = self.clock.now();
        let entry = ExecutionLogEntry {
            action_key: action_key.to_string(),
            citation,
            confidence,
            at: now,
        };
        {
            let entry = entry.clone();
            self.mutate(creator, move |record| {
                Self::require_active(creator, &record.phase)?;
                if record.log.len() >= MAX_EXECUTION_LOG {
                    return Err(ExecutionError::LogFull(MAX_EXECUTION_LOG));
                }
                if record.treasury_minor < total_minor {
                    return Err(ExecutionError::InsufficientTreasury {
                        required: total_minor,
                        available: record.treasury_minor,
                    });
                }
                record.treasury_minor -= total_minor;
                record.log.push(entry.clone());
                Ok(())
            })?;
        }

        info!(creator = %creator, recipients = shares.len(), total_minor, "revenue distributed");
        self.audit.append(AuditEvent::RevenueDistributed {
            creator,
            recipients: shares.len() as u32,
            total_minor,
            at: now,
        });
        Ok(Outcome::Executed { entry })
    }

    // ── Queries ──

    pub fn get(&self, creator: &ActorId) -> Result<ExecutionRecord, ExecutionError> {
        self.records
            .get(creator)
            .map(|v| v.record)
            .ok_or(ExecutionError::UnknownCreator(*creator))
    }

    // ── Internals ──

    /// The uniform two-part gate: operator capability, active phase, then
    /// resolver confidence and classifier verdict. Advisory classifier
    /// matches are audited even when the gate clears.
    fn evaluate_gate(
        &self,
        operator: ActorId,
        creator: ActorId,
        action_key: &str,
        description: &str,
    ) -> Result<Gate, ExecutionError> {
        self.authorize(operator)?;
        let record = self.get(&creator)?;
        Self::require_active(creator, &record.phase)?;

        let intent = self
            .intents
            .get(&creator)
            .map_err(|_| ExecutionError::UnknownCreator(creator))?;
        let resolution = self
            .resolver
            .resolve(&creator, action_key, &intent.corpus_digest);
        let verdict = self.classifier.classify(description);

        if verdict.is_advisory() {
            if let (Some(category), Some(matched)) = (verdict.category, verdict.matched.clone()) {
                self.audit.append(AuditEvent::AdvisoryMatch {
                    creator,
                    action_key: action_key.to_string(),
                    category: category.to_string(),
                    matched,
                    confidence: verdict.confidence,
                    at: self.clock.now(),
                });
            }
        }

        if verdict.prohibited {
            return Ok(Gate::Held(InactionReason::Prohibited {
                category: verdict
                    .category
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unspecified".into()),
                matched: verdict.matched,
                confidence: verdict.confidence,
            }));
        }
        if !Confidence::new(resolution.confidence).meets_threshold() {
            return Ok(Gate::Held(InactionReason::LowConfidence {
                confidence: resolution.confidence,
            }));
        }
        Ok(Gate::Cleared {
            citation: resolution.citation,
            confidence: resolution.confidence,
        })
    }

    /// Record a held gate: audit the inaction and hand it back as an
    /// `Ok` outcome. No record mutation occurs on this path.
    fn hold(&self, creator: ActorId, action_key: &str, reason: InactionReason) -> Outcome {
        warn!(creator = %creator, action_key, %reason, "gate held, no action taken");
        self.audit.append(AuditEvent::Inaction {
            creator,
            action_key: action_key.to_string(),
            reason: reason.clone(),
            at: self.clock.now(),
        });
        Outcome::Inaction { reason }
    }

    fn authorize(&self, caller: ActorId) -> Result<(), ExecutionError> {
        let cap = CapabilityId::new(CAP_OPERATOR);
        if !self.authority.holds(&caller, &cap) {
            return Err(ExecutionError::Unauthorized(caller));
        }
        Ok(())
    }

    fn require_active(creator: ActorId, phase: &ExecutionPhase) -> Result<(), ExecutionError> {
        match phase {
            ExecutionPhase::Active { .. } => Ok(()),
            ExecutionPhase::Dormant => Err(ExecutionError::NotActive(creator)),
            ExecutionPhase::Sunset { .. } => Err(ExecutionError::AlreadySunset(creator)),
        }
    }

    fn ensure_record(&self, creator: ActorId) -> Result<(), ExecutionError> {
        match self
            .records
            .insert(&creator, ExecutionRecord::dormant(creator))
        {
            Ok(()) | Err(StoreError::AlreadyExists(_)) => Ok(()),
            Err(other) => Err(ExecutionError::Store(other)),
        }
    }

    fn append_log(
        &self,
        creator: ActorId,
        action_key: &str,
        citation: String,
        confidence: u8,
    ) -> Result<ExecutionLogEntry, ExecutionError> {
        let entry = ExecutionLogEntry {
            action_key: action_key.to_string(),
            citation,
            confidence,
            at: self.clock.now(),
        };
        {
            let entry = entry.clone();
            self.mutate(creator, move |record| {
                Self::require_active(creator, &record.phase)?;
                if record.log.len() >= MAX_EXECUTION_LOG {
                    return Err(ExecutionError::LogFull(MAX_EXECUTION_LOG));
                }
                record.log.push(entry.clone());
                Ok(())
            })?;
        }
        Ok(entry)
    }

    /// Read-modify-compare-and-set with retry. The precondition closure
    /// re-runs against the winner's state on conflict, so racing callers
    /// settle exactly as if serialized.
    fn mutate<F>(&self, creator: ActorId, mut op: F) -> Result<(), ExecutionError>
    where
        F: FnMut(&mut ExecutionRecord) -> Result<(), ExecutionError>,
    {
        loop {
            let Versioned { version, record } = self
                .records
                .get(&creator)
                .ok_or(ExecutionError::UnknownCreator(creator))?;

            let mut updated = record;
            op(&mut updated)?;

            match self.records.compare_and_set(&creator, version, updated) {
                Ok(_) => return Ok(()),
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(other) => return Err(ExecutionError::Store(other)),
            }
        }
    }
}

use std::sync::Arc;

use tracing::error;

use posterity_execution::{ExecutionEngine, ExecutionError, Resolution, Resolver, SeededResolver};
use posterity_intent::IntentStore;
use posterity_platform::{
    AuditLog, CapabilityAuthority, Clock, MemoryAuthority, MemoryStore, SystemClock,
};
use posterity_sunset::{ClusteringAuthority, StaticClustering, SunsetEngine};
use posterity_trigger::{TriggerEngine, TriggerObserver, TriggerVerification, VerificationStatus};
use posterity_types::{ActorId, CapabilityId, Digest, Timestamp, CAP_SUBMITTER};

/// Bridges the trigger fire into execution activation.
///
/// Runs on the winning fire only. Activation failures are logged, not
/// propagated: the trigger transition has already committed, and the
/// activation can be retried through `ExecutionEngine::activate`.
struct ActivationObserver {
    execution: Arc<ExecutionEngine>,
}

impl TriggerObserver for ActivationObserver {
    fn on_triggered(&self, creator: ActorId, at: Timestamp) {
        if let Err(e) = self.execution.activate(creator, at) {
            error!(creator = %creator, error = %e, "activation after trigger failed");
        }
    }
}

/// Verification provider for deployments with no oracle-mode triggers:
/// answers `Pending` for everything, so oracle triggers simply never fire.
struct UnresolvedVerification;

impl TriggerVerification for UnresolvedVerification {
    fn check(
        &self,
        _creator: &ActorId,
        _event_type: &str,
        _data_digest: &Digest,
    ) -> VerificationStatus {
        VerificationStatus::Pending
    }
}

/// Assembles a `Posterity` instance from its external seams.
///
/// Every seam has a working default: wall clock, empty capability
/// authority, never-confirming oracle, single static cluster. Stores and
/// the audit log are process-local.
pub struct PosterityBuilder {
    clock: Arc<dyn Clock>,
    authority: Arc<dyn CapabilityAuthority>,
    verifier: Arc<dyn TriggerVerification>,
    clustering: Arc<dyn ClusteringAuthority>,
}

impl PosterityBuilder {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            authority: Arc::new(MemoryAuthority::new()),
            verifier: Arc::new(UnresolvedVerification),
            clustering: Arc::new(StaticClustering::new("unclustered")),
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn authority(mut self, authority: Arc<dyn CapabilityAuthority>) -> Self {
        self.authority = authority;
        self
    }

    pub fn verifier(mut self, verifier: Arc<dyn TriggerVerification>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn clustering(mut self, clustering: Arc<dyn ClusteringAuthority>) -> Self {
        self.clustering = clustering;
        self
    }

    pub fn build(self) -> Posterity {
        let audit = Arc::new(AuditLog::new());
        let resolver = Arc::new(SeededResolver::new());

        let intents = Arc::new(IntentStore::new(
            Arc::new(MemoryStore::new()),
            Arc::clone(&audit),
            Arc::clone(&self.clock),
        ));
        let execution = Arc::new(ExecutionEngine::new(
            Arc::new(MemoryStore::new()),
            Arc::clone(&intents),
            Arc::clone(&resolver) as Arc<dyn Resolver>,
            Arc::clone(&self.authority),
            Arc::clone(&audit),
            Arc::clone(&self.clock),
        ));
        let trigger = Arc::new(TriggerEngine::new(
            Arc::new(MemoryStore::new()),
            Arc::clone(&intents),
            self.verifier,
            vec![Arc::new(ActivationObserver {
                execution: Arc::clone(&execution),
            })],
            Arc::clone(&audit),
            Arc::clone(&self.clock),
        ));
        let sunset = Arc::new(SunsetEngine::new(
            Arc::new(MemoryStore::new()),
            Arc::clone(&execution),
            self.clustering,
            Arc::clone(&self.authority),
            Arc::clone(&audit),
            Arc::clone(&self.clock),
        ));

        Posterity {
            intents,
            trigger,
            execution,
            sunset,
            resolver,
            authority: self.authority,
            audit,
        }
    }
}

impl Default for PosterityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The assembled system: every engine wired to the shared audit log and
/// clock, with the trigger fire feeding execution activation.
pub struct Posterity {
    intents: Arc<IntentStore>,
    trigger: Arc<TriggerEngine>,
    execution: Arc<ExecutionEngine>,
    sunset: Arc<SunsetEngine>,
    resolver: Arc<SeededResolver>,
    authority: Arc<dyn CapabilityAuthority>,
    audit: Arc<AuditLog>,
}

impl Posterity {
    pub fn builder() -> PosterityBuilder {
        PosterityBuilder::new()
    }

    /// Seed a resolver entry ahead of query time. Gated on the submitter
    /// capability: resolution inputs come only from the trusted pipeline.
    pub fn seed_resolution(
        &self,
        caller: ActorId,
        creator: ActorId,
        query_key: impl Into<String>,
        resolution: Resolution,
    ) -> Result<(), ExecutionError> {
        let cap = CapabilityId::new(CAP_SUBMITTER);
        if !self.authority.holds(&caller, &cap) {
            return Err(ExecutionError::Unauthorized(caller));
        }
        self.resolver.seed(creator, query_key, resolution);
        Ok(())
    }

    pub fn intents(&self) -> &IntentStore {
        &self.intents
    }

    pub fn trigger(&self) -> &TriggerEngine {
        &self.trigger
    }

    pub fn execution(&self) -> &ExecutionEngine {
        &self.execution
    }

    pub fn sunset(&self) -> &SunsetEngine {
        &self.sunset
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }
}

use std::sync::Arc;

use tracing::{info, warn};

use posterity_execution::{ExecutionEngine, ExecutionError};
use posterity_platform::{AuditLog, CapabilityAuthority, Clock, RecordStore, StoreError, Versioned};
use posterity_types::limits::MAX_ARCHIVE_BATCH;
use posterity_types::{
    ActorId, AuditEvent, CapabilityId, ClusterId, CAP_ARCHIVER, CAP_OPERATOR,
};

use crate::clustering::ClusteringAuthority;
use crate::error::SunsetError;
use crate::record::{ArchivedAsset, PostSunsetLicense, SunsetPhase, SunsetRecord};

/// Drives the irreversible wind-down of a creator's execution.
///
/// Initiation rides on the execution record's one-way `Active -> Sunset`
/// edge, so racing initiators settle to exactly one winner there; the
/// pipeline then advances through its linear phase machine. Nothing in
/// this engine can be undone.
pub struct SunsetEngine {
    records: Arc<dyn RecordStore<SunsetRecord>>,
    execution: Arc<ExecutionEngine>,
    clustering: Arc<dyn ClusteringAuthority>,
    authority: Arc<dyn CapabilityAuthority>,
    audit: Arc<AuditLog>,
    clock: Arc<dyn Clock>,
}

impl SunsetEngine {
    pub fn new(
        records: Arc<dyn RecordStore<SunsetRecord>>,
        execution: Arc<ExecutionEngine>,
        clustering: Arc<dyn ClusteringAuthority>,
        authority: Arc<dyn CapabilityAuthority>,
        audit: Arc<AuditLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            records,
            execution,
            clustering,
            authority,
            audit,
            clock,
        }
    }

    /// Initiate sunset. Requires the operator capability and an elapsed
    /// execution window (inclusive at the boundary). Halts all gated
    /// execution as its first effect.
    pub fn initiate(&self, caller: ActorId, creator: ActorId) -> Result<(), SunsetError> {
        self.authorize(caller, CAP_OPERATOR)?;
        self.initiate_inner(creator, false)
    }

    /// The permissionless backstop: identical preconditions except that
    /// any party may call it, so an absent operator cannot stall the
    /// wind-down past its due date. Audited as a distinct event.
    pub fn initiate_emergency(&self, _caller: ActorId, creator: ActorId) -> Result<(), SunsetError> {
        self.initiate_inner(creator, true)
    }

    fn initiate_inner(&self, creator: ActorId, emergency: bool) -> Result<(), SunsetError> {
        // The execution record's one-way edge is the race arbiter: losers
        // observe AlreadySunset and cause no side effects.
        let sunset_at = self.execution.begin_sunset(creator).map_err(|e| match e {
            ExecutionError::SunsetNotReached { remaining_secs } => {
                SunsetError::TooEarly { remaining_secs }
            }
            ExecutionError::AlreadySunset(c) => SunsetError::AlreadyInitiated(c),
            other => SunsetError::Execution(other),
        })?;

        let execution = self.execution.get(&creator)?;
        let activated_at = execution.phase.activated_at().ok_or_else(|| {
            SunsetError::Validation("execution record carries no activation time".into())
        })?;

        let record = SunsetRecord::initiated(creator, activated_at, sunset_at, emergency);
        self.records.insert(&creator, record).map_err(|e| match e {
            StoreError::AlreadyExists(c) => SunsetError::AlreadyInitiated(c),
            other => SunsetError::Store(other),
        })?;

        if emergency {
            warn!(creator = %creator, "emergency sunset initiated");
        } else {
            info!(creator = %creator, "sunset initiated");
        }
        self.audit.append(AuditEvent::SunsetInitiated {
            creator,
            emergency,
            at: sunset_at,
        });
        Ok(())
    }

    /// Archive a batch of assets. Repeatable while the pipeline sits at
    /// `Initiated`; the archived list only ever grows.
    pub fn archive_batch(
        &self,
        caller: ActorId,
        creator: ActorId,
        assets: Vec<ArchivedAsset>,
    ) -> Result<usize, SunsetError> {
        self.authorize(caller, CAP_ARCHIVER)?;
        if assets.is_empty() || assets.len() > MAX_ARCHIVE_BATCH {
            return Err(SunsetError::BadBatchSize(assets.len()));
        }

        let batch_size = assets.len();
        let mut total_archived = 0;
        self.mutate(creator, |record| {
            record.phase.require(SunsetPhase::Initiated)?;
            record.archived.extend(assets.iter().cloned());
            total_archived = record.archived.len();
            Ok(())
        })?;

        info!(creator = %creator, batch_size, total_archived, "assets archived");
        self.audit.append(AuditEvent::AssetsArchived {
            creator,
            batch_size: batch_size as u32,
            total_archived: total_archived as u32,
            at: self.clock.now(),
        });
        Ok(total_archived)
    }

    /// Seal the archive. `Initiated -> AssetsArchived`, exactly once.
    pub fn finalize_archive(
        &self,
        caller: ActorId,
        creator: ActorId,
        archive_locator: String,
    ) -> Result<(), SunsetError> {
        self.authorize(caller, CAP_OPERATOR)?;
        if archive_locator.is_empty() {
            return Err(SunsetError::Validation(
                "archive locator must not be empty".into(),
            ));
        }

        let locator = archive_locator.clone();
        self.mutate(creator, move |record| {
            record.phase = record.phase.advance(SunsetPhase::AssetsArchived)?;
            record.archive_locator = Some(locator.clone());
            Ok(())
        })?;

        info!(creator = %creator, archive_locator, "archive finalized");
        self.audit.append(AuditEvent::ArchiveFinalized {
            creator,
            archive_locator,
            at: self.clock.now(),
        });
        Ok(())
    }

    /// Pass the creator's IP into its terminal license.
    /// `AssetsArchived -> IpTransitioned`; the choice is irreversible.
    pub fn transition_ip(
        &self,
        caller: ActorId,
        creator: ActorId,
        license: PostSunsetLicense,
    ) -> Result<(), SunsetError> {
        self.authorize(caller, CAP_OPERATOR)?;

        self.mutate(creator, |record| {
            record.phase = record.phase.advance(SunsetPhase::IpTransitioned)?;
            record.license = Some(license);
            Ok(())
        })?;

        info!(creator = %creator, %license, "ip transitioned");
        self.audit.append(AuditEvent::IpTransitioned {
            creator,
            license: license.to_string(),
            at: self.clock.now(),
        });
        Ok(())
    }

    /// Place the legacy into its cluster of kindred creators, as decided
    /// by the external clustering authority. `IpTransitioned -> Clustered`.
    pub fn assign_cluster(
        &self,
        caller: ActorId,
        creator: ActorId,
    ) -> Result<ClusterId, SunsetError> {
        self.authorize(caller, CAP_OPERATOR)?;

        let cluster = self.clustering.assign(&creator);
        {
            let cluster = cluster.clone();
            self.mutate(creator, move |record| {
                record.phase = record.phase.advance(SunsetPhase::Clustered)?;
                record.cluster = Some(cluster.clone());
                Ok(())
            })?;
        }

        info!(creator = %creator, %cluster, "legacy clustered");
        self.audit.append(AuditEvent::Clustered {
            creator,
            cluster: cluster.clone(),
            at: self.clock.now(),
        });
        Ok(cluster)
    }

    /// `Clustered -> Completed`, terminal. Reaching here proves every
    /// prior phase ran in order.
    pub fn complete(&self, caller: ActorId, creator: ActorId) -> Result<(), SunsetError> {
        self.authorize(caller, CAP_OPERATOR)?;

        self.mutate(creator, |record| {
            record.phase = record.phase.advance(SunsetPhase::Completed)?;
            Ok(())
        })?;

        info!(creator = %creator, "sunset completed");
        self.audit.append(AuditEvent::SunsetCompleted {
            creator,
            at: self.clock.now(),
        });
        Ok(())
    }

    pub fn get(&self, creator: &ActorId) -> Result<SunsetRecord, SunsetError> {
        self.records
            .get(creator)
            .map(|v| v.record)
            .ok_or(SunsetError::NotInitiated(*creator))
    }

    fn authorize(&self, caller: ActorId, capability: &str) -> Result<(), SunsetError> {
        let cap = CapabilityId::new(capability);
        if !self.authority.holds(&caller, &cap) {
            return Err(SunsetError::Unauthorized(caller));
        }
        Ok(())
    }

    fn mutate<F>(&self, creator: ActorId, mut op: F) -> Result<(), SunsetError>
    where
        F: FnMut(&mut SunsetRecord) -> Result<(), SunsetError>,
    {
        loop {
            let Versioned { version, record } = self
                .records
                .get(&creator)
                .ok_or(SunsetError::NotInitiated(creator))?;

            let mut updated = record;
            op(&mut updated)?;

            match self.records.compare_and_set(&creator, version, updated) {
                Ok(_) => return Ok(()),
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(other) => return Err(SunsetError::Store(other)),
            }
        }
    }
}

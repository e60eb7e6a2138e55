use std::collections::HashMap;
use std::sync::RwLock;

use posterity_types::{ActorId, Digest, Timestamp};

use crate::observer::TriggerObserver;
use crate::provider::{TriggerVerification, VerificationStatus};

/// Scriptable verification provider for testing.
///
/// Answers `Pending` for any creator it has no script for — the safe
/// default, matching a provider that has not settled.
pub struct MockVerifier {
    scripted: RwLock<HashMap<ActorId, VerificationStatus>>,
}

impl MockVerifier {
    pub fn new() -> Self {
        Self {
            scripted: RwLock::new(HashMap::new()),
        }
    }

    pub fn script(&self, creator: ActorId, status: VerificationStatus) {
        self.scripted.write().unwrap().insert(creator, status);
    }
}

impl Default for MockVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerVerification for MockVerifier {
    fn check(
        &self,
        creator: &ActorId,
        _event_type: &str,
        _data_digest: &Digest,
    ) -> VerificationStatus {
        self.scripted
            .read()
            .unwrap()
            .get(creator)
            .cloned()
            .unwrap_or(VerificationStatus::Pending)
    }
}

/// Observer that records every notification it receives.
pub struct RecordingObserver {
    notifications: RwLock<Vec<(ActorId, Timestamp)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            notifications: RwLock::new(Vec::new()),
        }
    }

    pub fn notifications(&self) -> Vec<(ActorId, Timestamp)> {
        self.notifications.read().unwrap().clone()
    }
}

impl Default for RecordingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerObserver for RecordingObserver {
    fn on_triggered(&self, creator: ActorId, at: Timestamp) {
        self.notifications.write().unwrap().push((creator, at));
    }
}

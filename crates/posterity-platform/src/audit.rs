use std::sync::RwLock;

use tracing::debug;

use posterity_types::{ActorId, AuditEntry, AuditEvent, EventId};

/// The public, append-only record of every transition.
///
/// APPEND-ONLY: no delete or modify operations exist on this type. Denied
/// gates, inaction outcomes, and advisory matches are recorded alongside
/// successful transitions — observability does not depend on outcome.
pub struct AuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append an event, returning its assigned id.
    pub fn append(&self, event: AuditEvent) -> EventId {
        let id = EventId::new();
        debug!(event_id = %id, creator = %event.creator(), "audit append");
        self.entries
            .write()
            .unwrap()
            .push(AuditEntry { id, event });
        id
    }

    /// All entries for one creator, in append order.
    pub fn for_creator(&self, creator: &ActorId) -> Vec<AuditEntry> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.event.creator() == *creator)
            .cloned()
            .collect()
    }

    /// Inaction entries for one creator, in append order.
    pub fn inactions_for(&self, creator: &ActorId) -> Vec<AuditEntry> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.event.creator() == *creator && e.event.is_inaction())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

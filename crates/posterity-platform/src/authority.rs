use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use posterity_types::{ActorId, CapabilityId};

/// The external capability/role authority.
///
/// Grants and revocations happen outside the core; every operator-gated
/// operation asks exactly one question at its top: does this caller hold
/// capability X.
pub trait CapabilityAuthority: Send + Sync {
    fn holds(&self, actor: &ActorId, capability: &CapabilityId) -> bool;
}

/// In-memory capability authority with explicit grant/revoke.
pub struct MemoryAuthority {
    grants: RwLock<HashMap<ActorId, HashSet<CapabilityId>>>,
}

impl MemoryAuthority {
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
        }
    }

    pub fn grant(&self, actor: ActorId, capability: impl Into<String>) {
        self.grants
            .write()
            .unwrap()
            .entry(actor)
            .or_default()
            .insert(CapabilityId::new(capability));
    }

    pub fn revoke(&self, actor: &ActorId, capability: &CapabilityId) {
        if let Some(caps) = self.grants.write().unwrap().get_mut(actor) {
            caps.remove(capability);
        }
    }
}

impl Default for MemoryAuthority {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityAuthority for MemoryAuthority {
    fn holds(&self, actor: &ActorId, capability: &CapabilityId) -> bool {
        self.grants
            .read()
            .unwrap()
            .get(actor)
            .map(|caps| caps.contains(capability))
            .unwrap_or(false)
    }
}

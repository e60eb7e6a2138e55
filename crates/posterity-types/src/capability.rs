use serde::{Deserialize, Serialize};

/// Identifier of a capability held by an actor.
///
/// The external capability authority grants and revokes capabilities; the
/// core only ever asks "does this caller hold capability X" at the top of
/// each operator-gated operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityId(pub String);

impl CapabilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cap:{}", self.0)
    }
}

/// Operator-gated lifecycle operations: sunset initiation, archive
/// finalization, IP transition, clustering, completion.
pub const CAP_OPERATOR: &str = "posterity.operator";

/// Asset archival during the sunset window.
pub const CAP_ARCHIVER: &str = "posterity.archiver";

/// Out-of-band seeding of resolver entries ahead of query time.
pub const CAP_SUBMITTER: &str = "posterity.submitter";

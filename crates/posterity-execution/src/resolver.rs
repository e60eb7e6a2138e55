use std::collections::HashMap;
use std::sync::RwLock;

use posterity_types::{ActorId, Digest};

/// A resolved citation against a creator's frozen corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub citation: String,
    /// 0..=100. Zero means "the corpus says nothing about this".
    pub confidence: u8,
}

impl Resolution {
    /// The answer for a key the corpus has no entry for.
    pub fn unknown() -> Self {
        Self {
            citation: String::new(),
            confidence: 0,
        }
    }
}

/// External corpus resolver.
///
/// Maps `(creator, query key, corpus digest)` to a citation and a
/// confidence score. Idempotent for identical inputs absent new
/// submissions. The core treats it as an opaque oracle: no similarity
/// search is assumed, only exact-key lookup against pre-computed entries.
pub trait Resolver: Send + Sync {
    fn resolve(&self, creator: &ActorId, query_key: &str, corpus_digest: &Digest) -> Resolution;
}

/// In-memory resolver fed by a trusted out-of-band submitter.
///
/// Seeded entries take precedence over the unknown fallback; an unseeded
/// key resolves to confidence 0, which the gate turns into inaction.
pub struct SeededResolver {
    entries: RwLock<HashMap<(ActorId, String), Resolution>>,
}

impl SeededResolver {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Pre-seed a result ahead of query time. Overwrites any prior entry
    /// for the same key.
    pub fn seed(&self, creator: ActorId, query_key: impl Into<String>, resolution: Resolution) {
        self.entries
            .write()
            .unwrap()
            .insert((creator, query_key.into()), resolution);
    }
}

impl Default for SeededResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for SeededResolver {
    fn resolve(&self, creator: &ActorId, query_key: &str, _corpus_digest: &Digest) -> Resolution {
        self.entries
            .read()
            .unwrap()
            .get(&(*creator, query_key.to_string()))
            .cloned()
            .unwrap_or_else(Resolution::unknown)
    }
}

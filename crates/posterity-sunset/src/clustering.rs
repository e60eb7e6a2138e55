use posterity_types::{ActorId, ClusterId};

/// External authority that places a completed legacy into a cluster of
/// kindred creators. The core never computes clusters; it records the
/// assignment it is handed.
pub trait ClusteringAuthority: Send + Sync {
    fn assign(&self, creator: &ActorId) -> ClusterId;
}

/// Assigns every creator to one fixed cluster. For tests and single-tenant
/// deployments.
pub struct StaticClustering {
    cluster: ClusterId,
}

impl StaticClustering {
    pub fn new(cluster: impl Into<String>) -> Self {
        Self {
            cluster: ClusterId(cluster.into()),
        }
    }
}

impl ClusteringAuthority for StaticClustering {
    fn assign(&self, _creator: &ActorId) -> ClusterId {
        self.cluster.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_clustering_is_uniform() {
        let authority = StaticClustering::new("mid-century-essayists");
        let a = authority.assign(&ActorId::new());
        let b = authority.assign(&ActorId::new());
        assert_eq!(a, b);
        assert_eq!(format!("{a}"), "clu:mid-century-essayists");
    }
}

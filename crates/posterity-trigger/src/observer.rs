use posterity_types::{ActorId, Timestamp};

/// Notified exactly once, by the winning fire, after the one-way
/// `Configured -> Triggered` transition has been committed.
///
/// Observers must be idempotent against replay of the same `(creator, at)`
/// pair and must not panic; a failing downstream activation is the
/// observer's to log, not the trigger's to roll back — the transition has
/// already happened.
pub trait TriggerObserver: Send + Sync {
    fn on_triggered(&self, creator: ActorId, at: Timestamp);
}

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A point in time as recorded by the platform.
///
/// Thin wrapper over `DateTime<Utc>` so that records and audit events carry
/// one time type and arithmetic stays in one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current wall-clock time. Engines never call this directly —
    /// they go through the injected clock so tests can steer time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The Unix epoch, used as a floor for uninitialized anchors.
    pub fn genesis() -> Self {
        Self(Utc.timestamp_opt(0, 0).unwrap())
    }

    pub fn from_unix(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).unwrap())
    }

    /// Duration elapsed since `earlier`; zero if `earlier` is in the future.
    pub fn since(&self, earlier: Timestamp) -> Duration {
        (self.0 - earlier.0).max(Duration::zero())
    }

    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn plus_seconds(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

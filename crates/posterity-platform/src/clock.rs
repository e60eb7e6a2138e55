use std::sync::RwLock;

use posterity_types::Timestamp;

/// Injectable time source.
///
/// Every engine reads time through this seam, so the twenty-year sunset
/// boundary and the dead-man interval are testable to the second.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to. For tests.
pub struct ManualClock {
    now: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn set(&self, to: Timestamp) {
        *self.now.write().unwrap() = to;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.write().unwrap();
        *now = now.plus_days(days);
    }

    pub fn advance_seconds(&self, secs: i64) {
        let mut now = self.now.write().unwrap();
        *now = now.plus_seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap()
    }
}

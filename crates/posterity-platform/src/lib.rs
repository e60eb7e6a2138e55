//! Platform seams for the Posterity execution kernel.
//!
//! The durable ledger/identity platform, the capability authority, and the
//! wall clock are external collaborators. This crate defines the narrow
//! traits the core consumes, plus in-memory implementations used by tests
//! and by deployments that keep state process-local.
//!
//! The record store contract is deliberately minimal: `get` plus atomic
//! per-record compare-and-set. The core performs no internal locking and
//! relies on version conflicts to serialize racing mutations on one record.

pub mod audit;
pub mod authority;
pub mod clock;
pub mod store;

pub use audit::AuditLog;
pub use authority::{CapabilityAuthority, MemoryAuthority};
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{MemoryStore, RecordStore, StoreError, Versioned};

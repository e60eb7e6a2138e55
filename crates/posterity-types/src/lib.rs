//! Core type definitions for the Posterity execution kernel.
//!
//! This crate provides all shared type definitions. No business logic — just
//! types. Every Posterity crate depends on this crate.

pub mod audit;
pub mod capability;
pub mod confidence;
pub mod digest;
pub mod ids;
pub mod limits;
pub mod temporal;

// Re-export primary types at crate root for ergonomic use.
pub use audit::{AuditEntry, AuditEvent, InactionReason};
pub use capability::{CapabilityId, CAP_ARCHIVER, CAP_OPERATOR, CAP_SUBMITTER};
pub use confidence::{Confidence, CONFIDENCE_THRESHOLD};
pub use digest::Digest;
pub use ids::{ActorId, ClusterId, EventId, LicenseId};
pub use temporal::Timestamp;

//! Wires the Posterity engines into one system.
//!
//! The facade owns the shared audit log and clock, feeds the trigger fire
//! into execution activation through an observer, and gates resolver
//! seeding on the submitter capability. The end-to-end suite lives under
//! `tests/`.

pub mod facade;

pub use facade::{Posterity, PosterityBuilder};

pub use posterity_classifier;
pub use posterity_execution;
pub use posterity_intent;
pub use posterity_platform;
pub use posterity_sunset;
pub use posterity_trigger;
pub use posterity_types;

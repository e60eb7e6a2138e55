//! Gated execution of pre-authorized actions during the active window.
//!
//! Every operation that acts on the world passes one uniform gate:
//! resolver confidence at or above the fixed threshold against the
//! creator's frozen corpus, and a clean verdict from the content
//! classifier. A held gate is `Outcome::Inaction` — an `Ok` result with
//! an audit entry, never an error and never a partial mutation.
//!
//! The phase machine is `Dormant -> Active -> Sunset`, one way. Deposits
//! are accepted while dormant; everything else waits for the trigger.

pub mod engine;
pub mod error;
pub mod record;
pub mod resolver;

pub use engine::{ExecutionEngine, Outcome};
pub use error::ExecutionError;
pub use record::{ExecutionLogEntry, ExecutionPhase, ExecutionRecord, License};
pub use resolver::{Resolution, Resolver, SeededResolver};

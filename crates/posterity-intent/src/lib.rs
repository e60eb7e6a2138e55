//! Intent capture and revoke lifecycle.
//!
//! One record per creator, exclusively owned by that creator's state
//! machine. The lifecycle is a tagged state with an explicit transition
//! table: `Active -> Revoked` and `Active -> Triggered` are the only
//! edges, so `triggered` and `revoked` are monotonic and mutually
//! exclusive by construction rather than by convention.

pub mod error;
pub mod record;
pub mod store;

pub use error::IntentError;
pub use record::{AssetRef, CorpusWindow, Goal, IntentLifecycle, IntentRecord};
pub use store::{CaptureRequest, IntentStore};

//! Irreversible sunset pipeline.
//!
//! Once the execution window elapses, the creator's legacy winds down
//! through a strictly linear phase machine: initiation halts execution,
//! assets are archived in bounded batches, the archive is sealed, the IP
//! passes into a terminal license, the legacy joins a cluster of kindred
//! creators, and the pipeline completes. No phase can be skipped,
//! repeated, or reversed.

pub mod clustering;
pub mod engine;
pub mod error;
pub mod record;

pub use clustering::{ClusteringAuthority, StaticClustering};
pub use engine::SunsetEngine;
pub use error::SunsetError;
pub use record::{ArchivedAsset, PostSunsetLicense, SunsetPhase, SunsetRecord};

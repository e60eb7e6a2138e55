#![allow(dead_code)]

use std::sync::Arc;

use posterity_integration::Posterity;

use posterity_execution::Resolution;
use posterity_platform::{Clock, ManualClock, MemoryAuthority};
use posterity_trigger::mocks::MockVerifier;
use posterity_trigger::{TriggerMode, TriggerVerification};
use posterity_intent::{CaptureRequest, CorpusWindow};
use posterity_types::{
    ActorId, Digest, Timestamp, CAP_ARCHIVER, CAP_OPERATOR, CAP_SUBMITTER,
};

/// 2020-01-01T00:00:00Z.
pub const EPOCH_2020: i64 = 1_577_836_800;

/// A fully wired system with a steerable clock, a scriptable oracle, and
/// one actor per capability.
pub struct World {
    pub system: Posterity,
    pub clock: Arc<ManualClock>,
    pub verifier: Arc<MockVerifier>,
    pub operator: ActorId,
    pub archiver: ActorId,
    pub submitter: ActorId,
}

pub fn world() -> World {
    // RUST_LOG steers log output when a test needs narrating.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let clock = Arc::new(ManualClock::new(Timestamp::from_unix(EPOCH_2020)));
    let verifier = Arc::new(MockVerifier::new());
    let authority = Arc::new(MemoryAuthority::new());

    let operator = ActorId::new();
    let archiver = ActorId::new();
    let submitter = ActorId::new();
    authority.grant(operator, CAP_OPERATOR);
    authority.grant(archiver, CAP_ARCHIVER);
    authority.grant(submitter, CAP_SUBMITTER);

    let system = Posterity::builder()
        .clock(clock.clone() as Arc<dyn Clock>)
        .authority(authority)
        .verifier(verifier.clone() as Arc<dyn TriggerVerification>)
        .build();

    World {
        system,
        clock,
        verifier,
        operator,
        archiver,
        submitter,
    }
}

pub fn capture_request(start_year: i32, end_year: i32) -> CaptureRequest {
    CaptureRequest {
        intent_digest: Digest([1u8; 32]),
        corpus_digest: Digest([2u8; 32]),
        corpus_locator: "ipfs://corpus".into(),
        asset_locator: Some("ipfs://assets".into()),
        corpus_window: CorpusWindow {
            start_year,
            end_year,
        },
    }
}

/// Capture an intent with a 2020–2025 corpus window.
pub fn captured_creator(w: &World) -> ActorId {
    let creator = ActorId::new();
    w.system
        .intents()
        .capture(creator, capture_request(2020, 2025))
        .unwrap();
    creator
}

pub fn deadman(w: &World, interval_days: u64) -> TriggerMode {
    TriggerMode::DeadmanSwitch {
        interval_days,
        last_check_in: w.clock.now(),
    }
}

/// Capture, configure a 30-day dead-man switch, let it lapse, and fire.
/// Activation happens through the trigger observer.
pub fn activated_creator(w: &World) -> ActorId {
    let creator = captured_creator(w);
    w.system.trigger().configure(creator, deadman(w, 30)).unwrap();
    w.clock.advance_days(31);
    w.system.trigger().fire(creator, creator).unwrap();
    creator
}

pub fn seed(w: &World, creator: ActorId, key: &str, confidence: u8) {
    w.system
        .seed_resolution(
            w.submitter,
            creator,
            key,
            Resolution {
                citation: "journal 2023, p.14".into(),
                confidence,
            },
        )
        .unwrap();
}

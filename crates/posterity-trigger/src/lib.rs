//! Trigger resolution for the Posterity kernel.
//!
//! A per-creator state machine: implicit Unconfigured, then
//! `Configured(mode)`, then the terminal `Triggered`. Three modes —
//! dead-man switch, trusted quorum, oracle verification — all resolve
//! into the same one-way transition, committed by compare-and-set so
//! racing callers settle to exactly one winner.

pub mod config;
pub mod engine;
pub mod error;
pub mod mocks;
pub mod observer;
pub mod provider;

pub use config::{TriggerMode, TriggerRecord, TriggerState};
pub use engine::TriggerEngine;
pub use error::TriggerError;
pub use observer::TriggerObserver;
pub use provider::{TriggerVerification, VerificationStatus};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use posterity_intent::{CaptureRequest, CorpusWindow, IntentStore};
    use posterity_platform::{AuditLog, Clock, ManualClock, MemoryStore};
    use posterity_types::{ActorId, Digest, Timestamp};

    use super::mocks::{MockVerifier, RecordingObserver};
    use super::*;

    struct Harness {
        engine: TriggerEngine,
        intents: Arc<IntentStore>,
        clock: Arc<ManualClock>,
        verifier: Arc<MockVerifier>,
        observer: Arc<RecordingObserver>,
    }

    fn harness() -> Harness {
        let audit = Arc::new(AuditLog::new());
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix(1_577_836_800)));
        let intents = Arc::new(IntentStore::new(
            Arc::new(MemoryStore::new()),
            Arc::clone(&audit),
            clock.clone() as Arc<dyn posterity_platform::Clock>,
        ));
        let verifier = Arc::new(MockVerifier::new());
        let observer = Arc::new(RecordingObserver::new());
        let engine = TriggerEngine::new(
            Arc::new(MemoryStore::new()),
            Arc::clone(&intents),
            verifier.clone() as Arc<dyn TriggerVerification>,
            vec![observer.clone() as Arc<dyn TriggerObserver>],
            audit,
            clock.clone() as Arc<dyn posterity_platform::Clock>,
        );
        Harness {
            engine,
            intents,
            clock,
            verifier,
            observer,
        }
    }

    fn captured_creator(h: &Harness) -> ActorId {
        let creator = ActorId::new();
        h.intents
            .capture(
                creator,
                CaptureRequest {
                    intent_digest: Digest([1u8; 32]),
                    corpus_digest: Digest([2u8; 32]),
                    corpus_locator: "ipfs://corpus".into(),
                    asset_locator: None,
                    corpus_window: CorpusWindow {
                        start_year: 2020,
                        end_year: 2025,
                    },
                },
            )
            .unwrap();
        creator
    }

    fn deadman(h: &Harness, days: u64) -> TriggerMode {
        TriggerMode::DeadmanSwitch {
            interval_days: days,
            last_check_in: h.clock.now(),
        }
    }

    #[test]
    fn configure_requires_captured_intent() {
        let h = harness();
        let nobody = ActorId::new();
        assert!(matches!(
            h.engine.configure(nobody, deadman(&h, 30)),
            Err(TriggerError::Intent(_))
        ));
    }

    #[test]
    fn deadman_fires_only_after_interval() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine.configure(creator, deadman(&h, 30)).unwrap();

        h.clock.advance_days(29);
        assert!(matches!(
            h.engine.fire(creator, creator),
            Err(TriggerError::CheckInTooRecent { .. })
        ));

        h.clock.advance_days(2);
        let fired_at = h.engine.fire(creator, creator).unwrap();
        assert_eq!(fired_at, h.clock.now());
        assert!(h.engine.get(&creator).unwrap().state.triggered());
    }

    #[test]
    fn check_in_rearms_the_switch() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine.configure(creator, deadman(&h, 30)).unwrap();

        h.clock.advance_days(29);
        h.engine.check_in(creator).unwrap();
        h.clock.advance_days(29);
        assert!(matches!(
            h.engine.fire(creator, creator),
            Err(TriggerError::CheckInTooRecent { .. })
        ));
    }

    #[test]
    fn second_fire_fails_cleanly_with_identical_state() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine.configure(creator, deadman(&h, 30)).unwrap();
        h.clock.advance_days(31);

        h.engine.fire(creator, creator).unwrap();
        let state_after_first = serde_json::to_string(&h.engine.get(&creator).unwrap()).unwrap();

        assert!(matches!(
            h.engine.fire(creator, creator),
            Err(TriggerError::AlreadyTriggered)
        ));
        let state_after_second = serde_json::to_string(&h.engine.get(&creator).unwrap()).unwrap();
        assert_eq!(state_after_first, state_after_second);

        // Observers heard about the transition exactly once.
        assert_eq!(h.observer.notifications().len(), 1);
    }

    #[test]
    fn triggered_config_is_immutable() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine.configure(creator, deadman(&h, 30)).unwrap();
        h.clock.advance_days(31);
        h.engine.fire(creator, creator).unwrap();

        assert!(matches!(
            h.engine.configure(creator, deadman(&h, 45)),
            Err(TriggerError::AlreadyTriggered)
        ));
        assert!(matches!(
            h.engine.check_in(creator),
            Err(TriggerError::AlreadyTriggered)
        ));
        // Reads remain available.
        assert!(h.engine.get(&creator).is_ok());
    }

    #[test]
    fn reconfigure_before_fire_is_allowed() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine.configure(creator, deadman(&h, 30)).unwrap();
        h.engine.configure(creator, deadman(&h, 60)).unwrap();

        h.clock.advance_days(45);
        assert!(matches!(
            h.engine.fire(creator, creator),
            Err(TriggerError::CheckInTooRecent { .. })
        ));
    }

    #[test]
    fn quorum_counts_distinct_signatures() {
        let h = harness();
        let creator = captured_creator(&h);
        let signers: Vec<ActorId> = (0..3).map(|_| ActorId::new()).collect();
        h.engine
            .configure(
                creator,
                TriggerMode::TrustedQuorum {
                    signers: signers.clone(),
                    threshold: 2,
                    submitted: BTreeMap::new(),
                },
            )
            .unwrap();

        assert!(matches!(
            h.engine.fire(signers[0], creator),
            Err(TriggerError::QuorumNotReached {
                collected: 0,
                threshold: 2
            })
        ));

        assert_eq!(h.engine.submit_signature(signers[0], creator).unwrap(), 1);

        // Resubmission is rejected, count unchanged.
        assert!(matches!(
            h.engine.submit_signature(signers[0], creator),
            Err(TriggerError::AlreadySigned(_))
        ));

        // Strangers may not sign.
        assert!(matches!(
            h.engine.submit_signature(ActorId::new(), creator),
            Err(TriggerError::NotASigner(_))
        ));

        assert_eq!(h.engine.submit_signature(signers[1], creator).unwrap(), 2);
        assert!(h.engine.fire(signers[1], creator).is_ok());
    }

    #[test]
    fn oracle_mode_respects_provider_view() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine
            .configure(
                creator,
                TriggerMode::OracleVerified {
                    event_type: "death_certificate".into(),
                    data_digest: Digest::zero(),
                    provider: "registry".into(),
                },
            )
            .unwrap();

        // Pending: not yet triggered.
        assert!(matches!(
            h.engine.fire(creator, creator),
            Err(TriggerError::OracleNotConfirmed(_))
        ));

        // Disputed: still not triggered.
        h.verifier.script(creator, VerificationStatus::Disputed);
        assert!(h.engine.fire(creator, creator).is_err());

        // Resolved below threshold: not triggered.
        h.verifier.script(
            creator,
            VerificationStatus::Resolved {
                valid: true,
                confidence: 94,
            },
        );
        assert!(h.engine.fire(creator, creator).is_err());

        // Resolved valid at threshold: fires.
        h.verifier.script(
            creator,
            VerificationStatus::Resolved {
                valid: true,
                confidence: 95,
            },
        );
        assert!(h.engine.fire(creator, creator).is_ok());
    }

    #[test]
    fn revoked_intent_never_fires() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine.configure(creator, deadman(&h, 30)).unwrap();
        h.intents.revoke(creator).unwrap();

        h.clock.advance_days(31);
        assert!(matches!(
            h.engine.fire(creator, creator),
            Err(TriggerError::Intent(_))
        ));
        assert!(!h.engine.get(&creator).unwrap().state.triggered());
    }

    #[test]
    fn fire_marks_intent_triggered() {
        let h = harness();
        let creator = captured_creator(&h);
        h.engine.configure(creator, deadman(&h, 30)).unwrap();
        h.clock.advance_days(31);
        let at = h.engine.fire(creator, creator).unwrap();

        let intent = h.intents.get(&creator).unwrap();
        assert!(intent.lifecycle.triggered());
        assert_eq!(h.observer.notifications(), vec![(creator, at)]);

        // Revocation is now impossible, forever.
        assert!(h.intents.revoke(creator).is_err());
    }
}

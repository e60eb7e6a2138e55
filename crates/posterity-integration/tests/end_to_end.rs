//! The full journey of one creator's legacy, from capture to completion.

mod common;

use posterity_sunset::{ArchivedAsset, PostSunsetLicense, SunsetPhase};
use posterity_types::limits::ACTIVE_WINDOW_DAYS;
use posterity_types::{ActorId, AuditEvent, Digest};

use common::*;

fn asset(n: usize) -> ArchivedAsset {
    ArchivedAsset {
        asset_ref: format!("letters/{n}"),
        locator: format!("ipfs://archive/{n}"),
        digest: Digest([n as u8; 32]),
    }
}

#[test]
fn capture_to_completed_sunset() {
    let w = world();
    let creator = captured_creator(&w);
    let donor = ActorId::new();

    // Funding arrives while the creator is alive and the record dormant.
    w.system.execution().deposit(donor, creator, 10_000).unwrap();

    // Dead-man switch at the 30-day minimum; silence for 31 days.
    w.system
        .trigger()
        .configure(creator, deadman(&w, 30))
        .unwrap();
    w.clock.advance_days(31);
    w.system.trigger().fire(creator, creator).unwrap();

    // The observer activated execution on the fire.
    let record = w.system.execution().get(&creator).unwrap();
    assert!(record.phase.is_active());
    assert!(w
        .system
        .intents()
        .get(&creator)
        .unwrap()
        .lifecycle
        .triggered());

    // A well-attested benign action executes.
    seed(&w, creator, "publish_memoir", 96);
    let outcome = w
        .system
        .execution()
        .execute_action(w.operator, creator, "publish_memoir", "publish the memoir")
        .unwrap();
    assert!(outcome.executed());

    // Twenty years on, the operator winds the legacy down.
    w.clock.advance_days(ACTIVE_WINDOW_DAYS);
    w.system.sunset().initiate(w.operator, creator).unwrap();

    let first: Vec<_> = (0..30).map(asset).collect();
    let second: Vec<_> = (30..60).map(asset).collect();
    w.system
        .sunset()
        .archive_batch(w.archiver, creator, first)
        .unwrap();
    assert_eq!(
        w.system
            .sunset()
            .archive_batch(w.archiver, creator, second)
            .unwrap(),
        60
    );

    w.system
        .sunset()
        .finalize_archive(w.operator, creator, "ipfs://archive/root".into())
        .unwrap();
    w.system
        .sunset()
        .transition_ip(w.operator, creator, PostSunsetLicense::Cc0)
        .unwrap();
    w.system.sunset().assign_cluster(w.operator, creator).unwrap();
    w.system.sunset().complete(w.operator, creator).unwrap();

    let sunset = w.system.sunset().get(&creator).unwrap();
    assert_eq!(sunset.phase, SunsetPhase::Completed);
    assert_eq!(sunset.archived.len(), 60);
    assert_eq!(sunset.license, Some(PostSunsetLicense::Cc0));
    assert!(sunset.cluster.is_some());

    // Execution is halted for good.
    assert!(w
        .system
        .execution()
        .execute_action(w.operator, creator, "publish_memoir", "publish the memoir")
        .is_err());

    // The audit trail tells the whole story, in order.
    let events = w.system.audit().for_creator(&creator);
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match &e.event {
            AuditEvent::IntentCaptured { .. } => "captured",
            AuditEvent::TreasuryDeposit { .. } => "deposit",
            AuditEvent::TriggerConfigured { .. } => "configured",
            AuditEvent::Triggered { .. } => "triggered",
            AuditEvent::ExecutionActivated { .. } => "activated",
            AuditEvent::ActionExecuted { .. } => "executed",
            AuditEvent::SunsetInitiated { .. } => "sunset_initiated",
            AuditEvent::AssetsArchived { .. } => "archived",
            AuditEvent::ArchiveFinalized { .. } => "finalized",
            AuditEvent::IpTransitioned { .. } => "ip",
            AuditEvent::Clustered { .. } => "clustered",
            AuditEvent::SunsetCompleted { .. } => "completed",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "captured",
            "deposit",
            "configured",
            "triggered",
            "activated",
            "executed",
            "sunset_initiated",
            "archived",
            "archived",
            "finalized",
            "ip",
            "clustered",
            "completed",
        ]
    );
}

#[test]
fn quorum_trigger_drives_the_same_pipeline() {
    let w = world();
    let creator = captured_creator(&w);
    let signers: Vec<ActorId> = (0..3).map(|_| ActorId::new()).collect();

    w.system
        .trigger()
        .configure(
            creator,
            posterity_trigger::TriggerMode::TrustedQuorum {
                signers: signers.clone(),
                threshold: 2,
                submitted: Default::default(),
            },
        )
        .unwrap();

    w.system
        .trigger()
        .submit_signature(signers[0], creator)
        .unwrap();
    assert!(w.system.trigger().fire(signers[0], creator).is_err());

    w.system
        .trigger()
        .submit_signature(signers[1], creator)
        .unwrap();
    w.system.trigger().fire(signers[1], creator).unwrap();

    assert!(w.system.execution().get(&creator).unwrap().phase.is_active());
}

#[test]
fn oracle_trigger_waits_for_confirmation() {
    let w = world();
    let creator = captured_creator(&w);
    w.system
        .trigger()
        .configure(
            creator,
            posterity_trigger::TriggerMode::OracleVerified {
                event_type: "death_certificate".into(),
                data_digest: Digest([7u8; 32]),
                provider: "registry".into(),
            },
        )
        .unwrap();

    // Unsettled oracle reads as "not triggered".
    assert!(w.system.trigger().fire(creator, creator).is_err());

    w.verifier.script(
        creator,
        posterity_trigger::VerificationStatus::Resolved {
            valid: true,
            confidence: 96,
        },
    );
    w.system.trigger().fire(creator, creator).unwrap();
    assert!(w.system.execution().get(&creator).unwrap().phase.is_active());
}

//! The execution gate seen from the outside: confidence threshold,
//! content policy, and the observability of inaction.

mod common;

use posterity_execution::{ExecutionError, Outcome, Resolution};
use posterity_types::{ActorId, AuditEvent, InactionReason};

use common::*;

#[test]
fn confidence_threshold_is_exactly_95() {
    let w = world();
    let creator = activated_creator(&w);

    for (confidence, should_run) in [(94u8, false), (95, true), (96, true)] {
        let key = format!("publish_memoir_{confidence}");
        seed(&w, creator, &key, confidence);
        let outcome = w
            .system
            .execution()
            .execute_action(w.operator, creator, &key, "publish the memoir")
            .unwrap();
        assert_eq!(outcome.executed(), should_run, "confidence {confidence}");
    }
}

#[test]
fn inaction_leaves_treasury_and_log_untouched() {
    let w = world();
    let creator = activated_creator(&w);
    w.system
        .execution()
        .deposit(ActorId::new(), creator, 5_000)
        .unwrap();
    seed(&w, creator, "donate", 99);

    let outcome = w
        .system
        .execution()
        .fund_project(
            w.operator,
            creator,
            "donate",
            "fund a campaign to influence the election",
            ActorId::new(),
            1_000,
        )
        .unwrap();
    assert!(matches!(
        outcome,
        Outcome::Inaction {
            reason: InactionReason::Prohibited { .. }
        }
    ));

    let record = w.system.execution().get(&creator).unwrap();
    assert_eq!(record.treasury_minor, 5_000);
    assert!(record.log.is_empty());

    // The held gate is on the public record.
    let inactions = w.system.audit().inactions_for(&creator);
    assert_eq!(inactions.len(), 1);
    match &inactions[0].event {
        AuditEvent::Inaction {
            action_key, reason, ..
        } => {
            assert_eq!(action_key, "donate");
            assert!(matches!(reason, InactionReason::Prohibited { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn political_evasions_are_blocked() {
    let w = world();
    let creator = activated_creator(&w);
    seed(&w, creator, "act", 99);

    for description in [
        "influence the election",
        "fund my campain for office",
        "push the 3l3ction result",
        "route dark money to the committee",
    ] {
        let outcome = w
            .system
            .execution()
            .execute_action(w.operator, creator, "act", description)
            .unwrap();
        assert!(outcome.is_inaction(), "missed block on {description:?}");
    }
}

#[test]
fn benign_descriptions_execute() {
    let w = world();
    let creator = activated_creator(&w);
    seed(&w, creator, "act", 99);

    for description in [
        "publish the collected letters",
        "insurance policy distribution to the estate",
        "a conservative estimate of print costs",
    ] {
        let outcome = w
            .system
            .execution()
            .execute_action(w.operator, creator, "act", description)
            .unwrap();
        assert!(outcome.executed(), "false block on {description:?}");
    }

    // The advisory hits among those are audited without blocking.
    let advisories = w
        .system
        .audit()
        .for_creator(&creator)
        .into_iter()
        .filter(|e| matches!(e.event, AuditEvent::AdvisoryMatch { .. }))
        .count();
    assert!(advisories >= 1);
}

#[test]
fn seeding_requires_the_submitter_capability() {
    let w = world();
    let creator = activated_creator(&w);
    let stranger = ActorId::new();

    let resolution = Resolution {
        citation: "journal 2023, p.14".into(),
        confidence: 99,
    };
    assert!(matches!(
        w.system
            .seed_resolution(stranger, creator, "publish_memoir", resolution.clone()),
        Err(ExecutionError::Unauthorized(_))
    ));
    assert!(w
        .system
        .seed_resolution(w.submitter, creator, "publish_memoir", resolution)
        .is_ok());
}

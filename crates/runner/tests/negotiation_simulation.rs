//! Negotiation Simulation Integration Test
//!
//! Drives the full loop end to end:
//! - Scripted deciders and events (deterministic scenarios)
//! - Seeded headline feed and bidders (reproducible randomized runs)
//! - Snapshot/resume, cancellation, and the audit trail

use agora_core::{AssetId, ParticipantId, ProposalDraft, SimulationState};
use agora_runner::{
    HeadlineFeed, HeadlineFeedConfig, ImpulsiveBidder, MemoryAudit, ScriptedDecider,
    ScriptedEvents, SilentDecider, SimulationConfig, SimulationRunner,
};
use std::sync::Arc;
use std::time::Duration;

fn pid(s: &str) -> ParticipantId {
    ParticipantId::new(s)
}

fn aid(s: &str) -> AssetId {
    AssetId::new(s)
}

fn three_club_config(max_turns: u64) -> SimulationConfig {
    SimulationConfig::default()
        .with_participant("alpha", 100)
        .with_participant("beta", 100)
        .with_participant("gamma", 100)
        .with_asset("relic", "alpha")
        .with_max_turns(max_turns)
}

/// The contested-asset scenario: B offers 30, C offers 50, C wins.
#[tokio::test]
async fn test_highest_offer_wins_contested_asset() {
    let mut runner = SimulationRunner::new(
        three_club_config(1),
        Box::new(ScriptedEvents::new(["relic rumored to be on the market"])),
    )
    .unwrap();
    runner.register_decider("alpha", Box::new(SilentDecider));
    runner.register_decider(
        "beta",
        Box::new(ScriptedDecider::new(
            "beta",
            vec![Some(ProposalDraft::new("relic", "alpha", "beta", 30))],
        )),
    );
    runner.register_decider(
        "gamma",
        Box::new(ScriptedDecider::new(
            "gamma",
            vec![Some(ProposalDraft::new("relic", "alpha", "gamma", 50))],
        )),
    );

    let result = runner.run().await.unwrap();

    assert_eq!(result.turns_executed, 1);
    let state = &result.state;
    assert_eq!(state.ledger.balance(&pid("alpha")), Some(150));
    assert_eq!(state.ledger.balance(&pid("beta")), Some(100));
    assert_eq!(state.ledger.balance(&pid("gamma")), Some(50));
    assert_eq!(state.ledger.owner_of(&aid("relic")), Some(&pid("gamma")));
    assert_eq!(state.transfers.len(), 1);
    assert_eq!(state.transfers[0].price, 50);
}

/// Equal offers: the earlier roster position wins, deterministically.
#[tokio::test]
async fn test_equal_offers_resolve_by_roster_order() {
    let mut runner = SimulationRunner::new(
        three_club_config(1),
        Box::new(ScriptedEvents::new(["deadline day"])),
    )
    .unwrap();
    runner.register_decider("alpha", Box::new(SilentDecider));
    runner.register_decider(
        "beta",
        Box::new(ScriptedDecider::new(
            "beta",
            vec![Some(ProposalDraft::new("relic", "alpha", "beta", 40))],
        )),
    );
    runner.register_decider(
        "gamma",
        Box::new(ScriptedDecider::new(
            "gamma",
            vec![Some(ProposalDraft::new("relic", "alpha", "gamma", 40))],
        )),
    );

    let result = runner.run().await.unwrap();

    assert_eq!(
        result.state.ledger.owner_of(&aid("relic")),
        Some(&pid("beta"))
    );
}

/// A turn with no proposals changes nothing but the counter, the event
/// and the log.
#[tokio::test]
async fn test_quiet_turn_only_advances_counter() {
    let mut runner = SimulationRunner::new(
        three_club_config(1),
        Box::new(ScriptedEvents::new(["a quiet day"])),
    )
    .unwrap();
    let initial = runner.snapshot().clone();
    runner.register_decider("alpha", Box::new(SilentDecider));
    runner.register_decider("beta", Box::new(SilentDecider));
    runner.register_decider("gamma", Box::new(SilentDecider));

    let result = runner.run().await.unwrap();

    let state = &result.state;
    assert_eq!(state.turn, 1);
    assert_eq!(state.ledger, initial.ledger);
    assert!(state.transfers.is_empty());
    assert!(state.pending.is_empty());
    assert_eq!(state.event_log, vec!["a quiet day".to_string()]);
}

/// Boundary: max_turns = 0 runs zero turns and returns the initial state.
#[tokio::test]
async fn test_zero_max_turns_returns_initial_state() {
    let mut runner = SimulationRunner::new(
        three_club_config(0),
        Box::new(ScriptedEvents::new(["never delivered"])),
    )
    .unwrap();
    let initial = runner.snapshot().clone();
    runner.register_decider("alpha", Box::new(SilentDecider));
    runner.register_decider("beta", Box::new(SilentDecider));
    runner.register_decider("gamma", Box::new(SilentDecider));

    let result = runner.run().await.unwrap();

    assert_eq!(result.turns_executed, 0);
    assert_eq!(result.state, initial);
}

/// Money is conserved across an entire randomized run.
#[tokio::test]
async fn test_balance_conservation_over_randomized_run() {
    let config = three_club_config(8)
        .with_asset("idol", "beta")
        .with_asset("totem", "gamma");
    let targets = vec![
        (aid("relic"), pid("alpha")),
        (aid("idol"), pid("beta")),
        (aid("totem"), pid("gamma")),
    ];
    let feed = HeadlineFeed::with_seed(HeadlineFeedConfig::default(), 11);
    let mut runner = SimulationRunner::new(config, Box::new(feed)).unwrap();
    for (seed, club) in ["alpha", "beta", "gamma"].iter().enumerate() {
        runner.register_decider(
            *club,
            Box::new(ImpulsiveBidder::with_seed(
                *club,
                targets.clone(),
                seed as u64,
            )),
        );
    }
    let total_before = runner.snapshot().ledger.total_money();

    let result = runner.run().await.unwrap();

    assert_eq!(result.turns_executed, 8);
    assert_eq!(result.state.ledger.total_money(), total_before);
    assert_eq!(result.state.event_log.len(), 8);
}

/// Two runs with identical seeds end in identical states.
#[tokio::test]
async fn test_seeded_runs_are_reproducible() {
    async fn run_once() -> SimulationState {
        let config = three_club_config(6).with_asset("idol", "beta");
        let targets = vec![(aid("relic"), pid("alpha")), (aid("idol"), pid("beta"))];
        let feed = HeadlineFeed::with_seed(HeadlineFeedConfig::default(), 99);
        let mut runner = SimulationRunner::new(config, Box::new(feed)).unwrap();
        for (seed, club) in ["alpha", "beta", "gamma"].iter().enumerate() {
            runner.register_decider(
                *club,
                Box::new(ImpulsiveBidder::with_seed(
                    *club,
                    targets.clone(),
                    seed as u64 + 40,
                )),
            );
        }
        runner.run().await.unwrap().state
    }

    let first = run_once().await;
    let second = run_once().await;

    assert_eq!(first, second);
}

/// Serializing a snapshot between turns and resuming yields the same
/// final state as an uninterrupted run.
#[tokio::test]
async fn test_snapshot_resume_matches_uninterrupted_run() {
    let events = ["opening day", "deadline looms"];
    let turn_one = Some(ProposalDraft::new("relic", "alpha", "beta", 30));
    let turn_two = Some(ProposalDraft::new("relic", "beta", "gamma", 70));

    // Uninterrupted run: beta buys relic on turn one, gamma on turn two.
    let mut full = SimulationRunner::new(
        three_club_config(2),
        Box::new(ScriptedEvents::new(events)),
    )
    .unwrap();
    full.register_decider("alpha", Box::new(SilentDecider));
    full.register_decider(
        "beta",
        Box::new(ScriptedDecider::new(
            "beta",
            vec![turn_one.clone(), None],
        )),
    );
    full.register_decider(
        "gamma",
        Box::new(ScriptedDecider::new("gamma", vec![None, turn_two.clone()])),
    );
    let uninterrupted = full.run().await.unwrap().state;

    // Interrupted run: one turn, snapshot through JSON, resume.
    let mut first_half = SimulationRunner::new(
        three_club_config(2),
        Box::new(ScriptedEvents::new(events)),
    )
    .unwrap();
    first_half.register_decider("alpha", Box::new(SilentDecider));
    first_half.register_decider(
        "beta",
        Box::new(ScriptedDecider::new("beta", vec![turn_one])),
    );
    first_half.register_decider("gamma", Box::new(ScriptedDecider::new("gamma", vec![None])));
    first_half.step().await.unwrap();

    let json = serde_json::to_string(first_half.snapshot()).unwrap();
    let restored: SimulationState = serde_json::from_str(&json).unwrap();

    let mut second_half = SimulationRunner::resume(
        three_club_config(2),
        restored,
        Box::new(ScriptedEvents::new(["deadline looms"])),
    )
    .unwrap();
    second_half.register_decider("alpha", Box::new(SilentDecider));
    second_half.register_decider("beta", Box::new(SilentDecider));
    second_half.register_decider(
        "gamma",
        Box::new(ScriptedDecider::new("gamma", vec![turn_two])),
    );
    let resumed = second_half.run().await.unwrap().state;

    assert_eq!(resumed, uninterrupted);
}

/// Cancellation between turns stops the run and leaves a consistent
/// state; the turn that already ran is kept.
#[tokio::test]
async fn test_cancellation_between_turns() {
    let mut runner = SimulationRunner::new(
        three_club_config(5),
        Box::new(ScriptedEvents::new(["opening day", "never delivered"])),
    )
    .unwrap();
    runner.register_decider("alpha", Box::new(SilentDecider));
    runner.register_decider(
        "beta",
        Box::new(ScriptedDecider::new(
            "beta",
            vec![Some(ProposalDraft::new("relic", "alpha", "beta", 30))],
        )),
    );
    runner.register_decider("gamma", Box::new(SilentDecider));
    let total_before = runner.snapshot().ledger.total_money();

    runner.step().await.unwrap();
    runner.cancel_handle().cancel();
    let result = runner.run().await.unwrap();

    assert_eq!(result.turns_executed, 1);
    assert_eq!(result.state.ledger.total_money(), total_before);
    assert_eq!(result.state.ledger.owner_of(&aid("relic")), Some(&pid("beta")));
}

/// The audit trail records every event and every resolved transfer.
#[tokio::test]
async fn test_audit_trail_records_events_and_transfers() {
    let audit = Arc::new(MemoryAudit::new());
    let mut runner = SimulationRunner::new(
        three_club_config(1),
        Box::new(ScriptedEvents::new(["relic on the market"])),
    )
    .unwrap()
    .with_audit(audit.clone());
    runner.register_decider("alpha", Box::new(SilentDecider));
    runner.register_decider(
        "beta",
        Box::new(ScriptedDecider::new(
            "beta",
            vec![Some(ProposalDraft::new("relic", "alpha", "beta", 30))],
        )),
    );
    runner.register_decider("gamma", Box::new(SilentDecider));

    runner.run().await.unwrap();

    let records = audit.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], "turn 0 event: relic on the market");
    assert!(records[1].contains("relic moved from alpha to beta for 30"));
}

/// Decision timeouts degrade to "no action" without blocking the run.
#[tokio::test(start_paused = true)]
async fn test_slow_decider_does_not_block_the_run() {
    use agora_ports::{Decider, DecisionContext, DecisionResult};
    use async_trait::async_trait;

    struct StallingDecider;

    #[async_trait]
    impl Decider for StallingDecider {
        async fn decide(&mut self, _ctx: &DecisionContext<'_>) -> DecisionResult {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }
    }

    let config = three_club_config(1).with_decision_timeout(Duration::from_millis(100));
    let mut runner =
        SimulationRunner::new(config, Box::new(ScriptedEvents::new(["opening day"]))).unwrap();
    runner.register_decider("alpha", Box::new(StallingDecider));
    runner.register_decider(
        "beta",
        Box::new(ScriptedDecider::new(
            "beta",
            vec![Some(ProposalDraft::new("relic", "alpha", "beta", 30))],
        )),
    );
    runner.register_decider("gamma", Box::new(SilentDecider));

    let result = runner.run().await.unwrap();

    assert_eq!(result.turns_executed, 1);
    assert_eq!(result.state.ledger.owner_of(&aid("relic")), Some(&pid("beta")));
}

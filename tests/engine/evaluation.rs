//! Integration tests for evaluation passes

use std::collections::HashMap;

use condgraph_engine::{
    ArenaOptions, ConditionArena, ConditionDescriptor, LogicalOperation, SimpleConditionConfig,
};
use condgraph_foundation::{ConditionState, LogEvent, MatchingState};

use condgraph_foundation::ConditionState::{False, True, Unknown};

const START: usize = 0;
const STOP: usize = 1;
const RESET: usize = 2;

fn matchers() -> HashMap<String, usize> {
    [("start", START), ("stop", STOP), ("reset", RESET)]
        .into_iter()
        .map(|(name, i)| (name.to_string(), i))
        .collect()
}

fn verdicts(hits: &[usize]) -> Vec<MatchingState> {
    (0..3)
        .map(|i| MatchingState::from_bool(hits.contains(&i)))
        .collect()
}

fn event() -> LogEvent {
    LogEvent::new(1, 0)
}

// =============================================================================
// Scenario: N0, N1 = NOT N0, N2 = N1 AND N0
// =============================================================================

fn scenario() -> ConditionArena {
    let descs = vec![
        ConditionDescriptor::simple("n0", SimpleConditionConfig::new().start("start")),
        ConditionDescriptor::combination("n1", LogicalOperation::Not, &["n0"]),
        ConditionDescriptor::combination("n2", LogicalOperation::And, &["n1", "n0"]),
    ];
    ConditionArena::build(&descs, &matchers(), ArenaOptions::default()).unwrap()
}

#[test]
fn scenario_before_events() {
    let arena = scenario();
    let states: Vec<_> = (0..3).map(|i| arena.is_condition_met(i)).collect();
    assert_eq!(states, vec![Unknown, Unknown, Unknown]);
}

#[test]
fn scenario_first_match() {
    let mut arena = scenario();
    let mut ctx = arena.new_context();

    arena.evaluate(&event(), &verdicts(&[START]), &mut ctx);

    assert_eq!(ctx.states(), &[True, False, False]);
    assert_eq!(ctx.changed(), &[true, true, true]);
}

#[test]
fn state_stable_without_pass() {
    let mut arena = scenario();
    let mut ctx = arena.new_context();
    arena.evaluate(&event(), &verdicts(&[START]), &mut ctx);

    let first = arena.is_condition_met(2);
    let second = arena.is_condition_met(2);
    assert_eq!(first, second);
}

#[test]
fn replay_is_deterministic() {
    let stream = [
        verdicts(&[START]),
        verdicts(&[]),
        verdicts(&[STOP]),
        verdicts(&[START, STOP]),
        verdicts(&[RESET]),
    ];

    let run = || {
        let mut arena = scenario();
        let mut ctx = arena.new_context();
        let mut history = Vec::new();
        for v in &stream {
            arena.evaluate(&event(), v, &mut ctx);
            history.push(ctx.clone());
        }
        history
    };

    assert_eq!(run(), run());
}

// =============================================================================
// Simple Condition Rules
// =============================================================================

fn toggle(config: SimpleConditionConfig) -> (ConditionArena, condgraph_engine::EvaluationContext) {
    let descs = vec![ConditionDescriptor::simple("t", config)];
    let arena = ConditionArena::build(&descs, &matchers(), ArenaOptions::default()).unwrap();
    let ctx = arena.new_context();
    (arena, ctx)
}

#[test]
fn stop_all_clears_every_slice() {
    let (mut arena, mut ctx) = toggle(
        SimpleConditionConfig::new()
            .start("start")
            .stop("stop")
            .stop_all("reset")
            .dimensions([1]),
    );

    for uid in 0..5 {
        arena.evaluate(&event().with_field(1, uid), &verdicts(&[START]), &mut ctx);
    }
    arena.evaluate(&event().with_field(1, 0), &verdicts(&[STOP]), &mut ctx);
    assert_eq!(ctx.state(0), True);

    arena.evaluate(&event(), &verdicts(&[RESET]), &mut ctx);
    assert_eq!(ctx.state(0), False);
    assert!(ctx.is_changed(0));
}

#[test]
fn nested_starts_need_matching_stops() {
    let (mut arena, mut ctx) = toggle(SimpleConditionConfig::new().start("start").stop("stop"));

    arena.evaluate(&event(), &verdicts(&[START]), &mut ctx);
    arena.evaluate(&event(), &verdicts(&[START]), &mut ctx);
    arena.evaluate(&event(), &verdicts(&[STOP]), &mut ctx);
    assert_eq!(ctx.state(0), True);
    assert!(!ctx.is_changed(0));

    arena.evaluate(&event(), &verdicts(&[STOP]), &mut ctx);
    assert_eq!(ctx.state(0), False);
    assert!(ctx.is_changed(0));
}

#[test]
fn slice_guardrail_caps_tracked_keys() {
    let descs = vec![ConditionDescriptor::simple(
        "t",
        SimpleConditionConfig::new().start("start").stop("stop").dimensions([1]),
    )];
    let mut arena =
        ConditionArena::build(&descs, &matchers(), ArenaOptions { max_slices: 2 }).unwrap();
    let mut ctx = arena.new_context();

    for uid in 0..3 {
        arena.evaluate(&event().with_field(1, uid), &verdicts(&[START]), &mut ctx);
    }
    // Stopping both tracked keys leaves nothing held: the third was dropped.
    for uid in 0..2 {
        arena.evaluate(&event().with_field(1, uid), &verdicts(&[STOP]), &mut ctx);
    }
    assert_eq!(ctx.state(0), False);
}

#[test]
fn unknown_children_keep_combination_unknown() {
    let descs = vec![
        ConditionDescriptor::simple("a", SimpleConditionConfig::new().start("start")),
        ConditionDescriptor::simple("b", SimpleConditionConfig::new().start("reset")),
        ConditionDescriptor::combination("either", LogicalOperation::Or, &["a", "b"]),
    ];
    let mut arena = ConditionArena::build(&descs, &matchers(), ArenaOptions::default()).unwrap();
    let mut ctx = arena.new_context();

    arena.evaluate(&event(), &verdicts(&[START]), &mut ctx);
    assert_eq!(ctx.states(), &[True, Unknown, Unknown]);

    arena.evaluate(&event(), &verdicts(&[RESET]), &mut ctx);
    assert_eq!(ctx.states(), &[True, True, True]);
}

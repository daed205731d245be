//! Integration tests for dimensioned queries

use std::collections::HashMap;

use condgraph_engine::{
    ArenaOptions, ConditionArena, ConditionDescriptor, DimensionQuery, LogicalOperation,
    SimpleConditionConfig,
};
use condgraph_foundation::{ConditionState, DimensionKey, LogEvent, MatchingState};

const UID: u32 = 1;

/// N3 is dimensioned on uid; the other nodes only exist to give it an index of 3.
fn arena() -> ConditionArena {
    let matchers: HashMap<String, usize> = [("acquire".to_string(), 0), ("release".to_string(), 1)]
        .into_iter()
        .collect();
    let descs = vec![
        ConditionDescriptor::simple("n0", SimpleConditionConfig::new().start("acquire")),
        ConditionDescriptor::combination("n1", LogicalOperation::Not, &["n0"]),
        ConditionDescriptor::combination("n2", LogicalOperation::And, &["n0", "n3"]),
        ConditionDescriptor::simple(
            "n3",
            SimpleConditionConfig::new()
                .start("acquire")
                .stop("release")
                .dimensions([UID]),
        ),
    ];
    ConditionArena::build(&descs, &matchers, ArenaOptions::default()).unwrap()
}

fn acquired(uids: &[i64]) -> ConditionArena {
    let mut arena = arena();
    let mut ctx = arena.new_context();
    for &uid in uids {
        let event = LogEvent::new(1, 0).with_field(UID, uid);
        arena.evaluate(
            &event,
            &[MatchingState::Matched, MatchingState::NotMatched],
            &mut ctx,
        );
    }
    arena
}

fn for_uid(uid: i64) -> DimensionQuery {
    DimensionQuery::for_slice(DimensionKey::default().with(UID, uid))
}

#[test]
fn uids_are_independent() {
    let arena = acquired(&[7]);

    assert_eq!(arena.query(3, &for_uid(7)), ConditionState::True);
    assert_eq!(arena.query(3, &for_uid(8)), ConditionState::False);
    assert_eq!(arena.is_condition_met(3), ConditionState::True);
}

#[test]
fn queries_are_idempotent() {
    let arena = acquired(&[7, 9]);
    let q = for_uid(8);

    let answers: Vec<_> = (0..3).map(|_| arena.query(2, &q)).collect();
    assert_eq!(answers, vec![ConditionState::False; 3]);
    assert_eq!(arena.is_condition_met(2), ConditionState::True);
}

#[test]
fn undimensioned_children_use_aggregate() {
    let arena = acquired(&[7]);
    assert_eq!(arena.query_by_name("n0", &for_uid(8)), Some(ConditionState::True));
    assert_eq!(arena.query_by_name("n1", &for_uid(8)), Some(ConditionState::False));
}

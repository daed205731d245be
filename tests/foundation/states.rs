//! Integration tests for tri-state values

use condgraph_foundation::{ConditionState, MatchingState};

#[test]
fn defaults_are_unknown() {
    assert_eq!(ConditionState::default(), ConditionState::Unknown);
    assert_eq!(MatchingState::default(), MatchingState::Unknown);
}

#[test]
fn condition_state_conversions() {
    assert_eq!(ConditionState::from(true), ConditionState::True);
    assert_eq!(ConditionState::from_bool(false), ConditionState::False);
    assert_eq!(ConditionState::Unknown.to_bool(), None);
    assert_eq!(ConditionState::True.to_bool(), Some(true));
    assert!(ConditionState::True.is_true());
    assert!(!ConditionState::Unknown.is_true());
}

#[test]
fn unknown_is_not_false() {
    assert_ne!(ConditionState::Unknown, ConditionState::False);
    assert!(!ConditionState::False.is_unknown());
    assert!(!MatchingState::Unknown.is_matched());
    assert!(!MatchingState::NotMatched.is_matched());
    assert!(MatchingState::Matched.is_matched());
}

#[test]
fn display() {
    assert_eq!(ConditionState::Unknown.to_string(), "unknown");
    assert_eq!(ConditionState::True.to_string(), "true");
}

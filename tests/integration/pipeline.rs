//! End-to-end pipeline tests

use condgraph::engine::DimensionQuery;
use condgraph::foundation::{ConditionState, DimensionKey};
use condgraph::runtime::ConditionPipeline;

use crate::{TAG, UID, battery_reset, init_logging, screen, wakelock, wakelock_config};

fn pipeline() -> ConditionPipeline {
    init_logging();
    ConditionPipeline::from_config(&wakelock_config()).unwrap()
}

fn state(pipeline: &ConditionPipeline, name: &str) -> ConditionState {
    pipeline.condition_state(name).unwrap()
}

#[test]
fn descriptors_need_not_be_topological() {
    let pipeline = pipeline();
    let order = pipeline.arena().evaluation_order();
    let root = pipeline.arena().index_of("wakelock_while_off").unwrap();
    assert_eq!(order.last(), Some(&root));
}

#[test]
fn wakelock_held_while_screen_off() {
    let mut pipeline = pipeline();

    pipeline.on_log_event(&screen(1));
    assert_eq!(state(&pipeline, "screen_is_off"), ConditionState::True);
    assert_eq!(state(&pipeline, "wakelock_while_off"), ConditionState::Unknown);

    pipeline.on_log_event(&wakelock(1000, "sync", 1));
    assert_eq!(state(&pipeline, "wakelock_while_off"), ConditionState::True);

    pipeline.on_log_event(&wakelock(1000, "sync", 0));
    assert_eq!(state(&pipeline, "wakelock_while_off"), ConditionState::False);
}

#[test]
fn release_without_acquire_is_known_false() {
    let mut pipeline = pipeline();
    pipeline.on_log_event(&wakelock(1000, "sync", 0));
    assert_eq!(state(&pipeline, "holding_wakelock"), ConditionState::False);
}

#[test]
fn battery_reset_drops_all_wakelocks() {
    let mut pipeline = pipeline();
    pipeline.on_log_event(&screen(1));
    pipeline.on_log_event(&wakelock(1000, "sync", 1));
    pipeline.on_log_event(&wakelock(1001, "audio", 1));

    let summary = pipeline.on_log_event(&battery_reset());
    assert_eq!(summary.changed, 2);
    assert_eq!(state(&pipeline, "holding_wakelock"), ConditionState::False);
    assert_eq!(state(&pipeline, "wakelock_while_off"), ConditionState::False);
}

#[test]
fn events_missing_dimensions_are_ignored() {
    let mut pipeline = pipeline();
    let partial = condgraph::foundation::LogEvent::new(crate::WAKELOCK, 0)
        .with_field(crate::STATE, 1)
        .with_field(UID, 1000);

    pipeline.on_log_event(&partial);
    assert_eq!(state(&pipeline, "holding_wakelock"), ConditionState::Unknown);
}

#[test]
fn per_slice_queries() {
    let mut pipeline = pipeline();
    pipeline.on_log_event(&screen(1));
    pipeline.on_log_event(&wakelock(1000, "sync", 1));

    let slice = |uid: i64, tag: &str| {
        DimensionQuery::for_slice(DimensionKey::default().with(UID, uid).with(TAG, tag))
    };

    assert_eq!(
        pipeline.query("wakelock_while_off", &slice(1000, "sync")),
        Some(ConditionState::True)
    );
    assert_eq!(
        pipeline.query("wakelock_while_off", &slice(1000, "audio")),
        Some(ConditionState::False)
    );
    assert_eq!(
        pipeline.query("wakelock_while_off", &slice(2000, "sync")),
        Some(ConditionState::False)
    );
    assert_eq!(pipeline.query("nope", &slice(1000, "sync")), None);
}

#[test]
fn sliced_conditions_report_slice_moves() {
    let mut pipeline = pipeline();
    pipeline.set_sliced("wakelock_while_off").unwrap();
    let root = pipeline.arena().index_of("wakelock_while_off").unwrap();

    pipeline.on_log_event(&screen(1));
    pipeline.on_log_event(&wakelock(1000, "sync", 1));
    assert!(pipeline.context().is_changed(root));

    pipeline.on_log_event(&wakelock(1001, "sync", 1));
    assert!(!pipeline.context().is_changed(root));
    assert!(pipeline.context().slice_changed()[root]);
}

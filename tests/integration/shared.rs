//! Shared pipeline and wizard tests

use std::thread;

use condgraph::engine::DimensionQuery;
use condgraph::foundation::{ConditionState, DimensionKey};
use condgraph::runtime::SharedPipeline;

use crate::{TAG, UID, init_logging, screen, wakelock, wakelock_config};

#[test]
fn aggregator_reads_through_wizard() {
    init_logging();
    let pipeline = SharedPipeline::from_config(&wakelock_config()).unwrap();
    let wizard = pipeline.wizard();

    pipeline.on_log_event(&screen(1));
    pipeline.on_log_event(&wakelock(1000, "sync", 1));

    let reader = {
        let wizard = wizard.clone();
        thread::spawn(move || {
            let key = DimensionKey::default().with(UID, 1000).with(TAG, "sync");
            (
                wizard.is_condition_met("wakelock_while_off"),
                wizard.query("wakelock_while_off", &DimensionQuery::for_slice(key)),
            )
        })
    };

    let (aggregate, slice) = reader.join().unwrap();
    assert_eq!(aggregate, Some(ConditionState::True));
    assert_eq!(slice, Some(ConditionState::True));
    assert_eq!(wizard.is_condition_met("screen_is_on"), Some(ConditionState::False));
}

#[test]
fn set_sliced_through_shared_handle() {
    let pipeline = SharedPipeline::from_config(&wakelock_config()).unwrap();
    pipeline.set_sliced("holding_wakelock").unwrap();
    assert!(pipeline.set_sliced("missing").is_err());

    let sliced = pipeline.with_pipeline(|p| {
        let index = p.arena().index_of("holding_wakelock").unwrap();
        p.arena().node(index).is_sliced()
    });
    assert!(sliced);
}

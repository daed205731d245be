//! Configuration persistence tests

use condgraph::foundation::ErrorKind;
use condgraph::runtime::{
    ConditionPipeline, PipelineLimits, from_bytes, load_from_file, save_to_file, to_bytes,
};

use crate::{init_logging, screen, wakelock, wakelock_config};

#[test]
fn loaded_config_behaves_identically() {
    init_logging();
    let config = wakelock_config();
    let path = std::env::temp_dir().join("condgraph_integration_config.msgpack");

    save_to_file(&config, &path).unwrap();
    let loaded = load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, config);

    let mut original = ConditionPipeline::from_config(&config).unwrap();
    let mut restored = ConditionPipeline::from_config(&loaded).unwrap();
    for event in [screen(1), wakelock(1000, "sync", 1), screen(2), wakelock(1000, "sync", 0)] {
        assert_eq!(original.on_log_event(&event), restored.on_log_event(&event));
        assert_eq!(original.context(), restored.context());
    }
}

#[test]
fn limits_survive_round_trip() {
    let config = wakelock_config().with_limits(PipelineLimits {
        max_conditions: 4,
        max_slices_per_condition: 10,
        ..PipelineLimits::default()
    });
    let restored = from_bytes(&to_bytes(&config).unwrap()).unwrap();
    assert_eq!(restored.limits, config.limits);
}

#[test]
fn oversized_config_rejected_after_load() {
    let config = wakelock_config().with_limits(PipelineLimits {
        max_conditions: 3,
        ..PipelineLimits::default()
    });
    let restored = from_bytes(&to_bytes(&config).unwrap()).unwrap();

    let err = ConditionPipeline::from_config(&restored).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}

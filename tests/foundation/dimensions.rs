//! Integration tests for dimension keys and events

use std::collections::HashMap;

use condgraph_foundation::{DimensionKey, FieldValue, LogEvent};

const UID: u32 = 1;
const PACKAGE: u32 = 2;

// =============================================================================
// Dimension Keys
// =============================================================================

#[test]
fn keys_are_structural_map_keys() {
    let mut held: HashMap<DimensionKey, u32> = HashMap::new();
    held.insert(DimensionKey::default().with(UID, 7), 1);

    let probe = DimensionKey::default().with(UID, 7);
    assert_eq!(held.get(&probe), Some(&1));
    assert!(!held.contains_key(&DimensionKey::default().with(UID, 8)));
}

#[test]
fn default_key_is_empty() {
    let key = DimensionKey::default_key();
    assert!(key.is_default());
    assert!(key.is_empty());
    assert_eq!(key.to_string(), "[]");
}

#[test]
fn projection_normalizes_order() {
    let wide = DimensionKey::default().with(PACKAGE, "com.example").with(UID, 7);
    let narrow = DimensionKey::default().with(UID, 7).with(PACKAGE, "com.example");

    assert_ne!(wide, narrow);
    assert_eq!(wide.project(&[UID, PACKAGE]), Some(narrow));
    assert_eq!(wide.project(&[UID]).map(|k| k.len()), Some(1));
}

#[test]
fn display_lists_fields() {
    let key = DimensionKey::default().with(UID, 7).with(PACKAGE, "a");
    assert_eq!(key.to_string(), "[1:7|2:\"a\"]");
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn event_builds_keys_in_requested_order() {
    let event = LogEvent::new(10, 5)
        .with_field(UID, 7)
        .with_field(PACKAGE, "com.example")
        .with_field(3, true);

    let key = event.dimension_key(&[PACKAGE, UID]).unwrap();
    assert_eq!(key.get(UID), Some(&FieldValue::Int(7)));
    assert_eq!(
        key,
        DimensionKey::default().with(PACKAGE, "com.example").with(UID, 7)
    );
    assert_eq!(event.field(3), Some(&FieldValue::Bool(true)));
}

#[test]
fn event_without_field_has_no_key() {
    let event = LogEvent::new(10, 5).with_field(PACKAGE, "com.example");
    assert!(event.dimension_key(&[UID]).is_none());
}

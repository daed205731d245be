//! Parsed log events.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dimension::{DimensionField, DimensionKey, FieldId, FieldValue};

/// A log event after parsing: a tag, a timestamp, and typed fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogEvent {
    /// Tag (atom) id identifying the event type.
    pub tag_id: u32,
    /// Elapsed realtime at which the event was logged, in nanoseconds.
    pub elapsed_ns: u64,
    fields: BTreeMap<FieldId, FieldValue>,
}

impl LogEvent {
    /// Creates an event with no fields.
    #[must_use]
    pub fn new(tag_id: u32, elapsed_ns: u64) -> Self {
        Self {
            tag_id,
            elapsed_ns,
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field, returning the updated event.
    #[must_use]
    pub fn with_field(mut self, field: FieldId, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn field(&self, field: FieldId) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Returns all fields in id order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &FieldValue)> {
        self.fields.iter().map(|(id, value)| (*id, value))
    }

    /// Builds the dimension key for the given fields, in the given order.
    ///
    /// Returns `None` if the event lacks any of the fields. An empty field
    /// list yields the default key.
    #[must_use]
    pub fn dimension_key(&self, dimensions: &[FieldId]) -> Option<DimensionKey> {
        dimensions
            .iter()
            .map(|&field| {
                self.fields
                    .get(&field)
                    .map(|value| DimensionField::new(field, value.clone()))
            })
            .collect()
    }
}

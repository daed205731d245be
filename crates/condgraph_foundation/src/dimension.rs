//! Dimension keys for sliced conditions.
//!
//! A [`DimensionKey`] is an ordered tuple of `(field, value)` pairs that
//! identifies one slice of a dimensioned condition. Equality and hashing are
//! structural: the same fields with the same values in the same order are the
//! same key.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a field within a log event.
pub type FieldId = u32;

/// A hashable field value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldValue {
    /// Signed integer (also used for uids and enums).
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// String value.
    Str(Arc<str>),
}

impl FieldValue {
    /// Creates a string value.
    #[must_use]
    pub fn str(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::str(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}

/// One `(field, value)` pair of a dimension key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionField {
    /// Field id within the event.
    pub field: FieldId,
    /// Value of the field.
    pub value: FieldValue,
}

impl DimensionField {
    /// Creates a new dimension field.
    #[must_use]
    pub fn new(field: FieldId, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Identifies one slice of a dimensioned condition.
///
/// The empty key is the default key used by conditions without dimensions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionKey(Vec<DimensionField>);

impl DimensionKey {
    /// Creates a key from its fields, keeping their order.
    #[must_use]
    pub fn new(fields: Vec<DimensionField>) -> Self {
        Self(fields)
    }

    /// Returns the default (empty) key.
    #[must_use]
    pub fn default_key() -> Self {
        Self(Vec::new())
    }

    /// Appends a field, returning the extended key.
    #[must_use]
    pub fn with(mut self, field: FieldId, value: impl Into<FieldValue>) -> Self {
        self.0.push(DimensionField::new(field, value));
        self
    }

    /// Returns true if this is the default key.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the key has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the fields of the key in order.
    #[must_use]
    pub fn fields(&self) -> &[DimensionField] {
        &self.0
    }

    /// Returns the value of a field, if the key contains it.
    #[must_use]
    pub fn get(&self, field: FieldId) -> Option<&FieldValue> {
        self.0.iter().find(|f| f.field == field).map(|f| &f.value)
    }

    /// Projects this key onto the given fields, in the given order.
    ///
    /// Returns `None` if any requested field is missing from this key.
    #[must_use]
    pub fn project(&self, fields: &[FieldId]) -> Option<DimensionKey> {
        fields
            .iter()
            .map(|&field| self.get(field).map(|value| DimensionField::new(field, value.clone())))
            .collect::<Option<Vec<_>>>()
            .map(DimensionKey)
    }
}

impl FromIterator<DimensionField> for DimensionKey {
    fn from_iter<I: IntoIterator<Item = DimensionField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}:{}", field.field, field.value)?;
        }
        write!(f, "]")
    }
}

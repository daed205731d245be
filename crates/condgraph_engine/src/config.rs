//! Condition descriptors.
//!
//! Descriptors reference matchers and other conditions by name. They are
//! resolved to indices by the [`Initializer`](crate::init::Initializer).

use condgraph_foundation::FieldId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default cap on the number of slices one simple condition tracks.
pub const DEFAULT_MAX_SLICES: usize = 800;

/// Boolean operator of a combination condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogicalOperation {
    /// All children true.
    And,
    /// Any child true.
    Or,
    /// The single child false.
    Not,
    /// Any child false.
    Nand,
    /// No child true.
    Nor,
}

impl LogicalOperation {
    /// Returns the operator name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
        }
    }
}

/// State a simple condition reports before it sees its first event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitialValue {
    /// Report `Unknown` until a start, stop, or stop-all matcher fires.
    #[default]
    Unknown,
    /// Report `False` from the start.
    False,
}

/// Configuration of a simple (atomic) condition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimpleConditionConfig {
    /// Matcher that starts the condition.
    pub start: Option<String>,
    /// Matcher that stops the condition for the event's slice.
    pub stop: Option<String>,
    /// Matcher that stops every slice at once.
    pub stop_all: Option<String>,
    /// Whether nested starts need the same number of stops.
    pub count_nesting: bool,
    /// Event fields that slice the condition.
    pub dimensions: Vec<FieldId>,
    /// State before the first relevant event.
    pub initial_value: InitialValue,
}

impl Default for SimpleConditionConfig {
    fn default() -> Self {
        Self {
            start: None,
            stop: None,
            stop_all: None,
            count_nesting: true,
            dimensions: Vec::new(),
            initial_value: InitialValue::Unknown,
        }
    }
}

impl SimpleConditionConfig {
    /// Creates an empty configuration with nesting enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start matcher.
    #[must_use]
    pub fn start(mut self, matcher: impl Into<String>) -> Self {
        self.start = Some(matcher.into());
        self
    }

    /// Sets the stop matcher.
    #[must_use]
    pub fn stop(mut self, matcher: impl Into<String>) -> Self {
        self.stop = Some(matcher.into());
        self
    }

    /// Sets the stop-all matcher.
    #[must_use]
    pub fn stop_all(mut self, matcher: impl Into<String>) -> Self {
        self.stop_all = Some(matcher.into());
        self
    }

    /// Sets whether nesting is counted.
    #[must_use]
    pub fn count_nesting(mut self, count: bool) -> Self {
        self.count_nesting = count;
        self
    }

    /// Sets the dimension fields.
    #[must_use]
    pub fn dimensions(mut self, fields: impl Into<Vec<FieldId>>) -> Self {
        self.dimensions = fields.into();
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial_value(mut self, value: InitialValue) -> Self {
        self.initial_value = value;
        self
    }
}

/// What a condition is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConditionSpec {
    /// Driven directly by matchers.
    Simple(SimpleConditionConfig),
    /// Driven by other conditions.
    Combination {
        /// Operator applied to the children.
        operation: LogicalOperation,
        /// Child condition names.
        children: Vec<String>,
    },
}

/// A named condition as it appears in configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConditionDescriptor {
    /// Unique condition name.
    pub name: String,
    /// Definition of the condition.
    pub spec: ConditionSpec,
}

impl ConditionDescriptor {
    /// Creates a simple condition descriptor.
    #[must_use]
    pub fn simple(name: impl Into<String>, config: SimpleConditionConfig) -> Self {
        Self {
            name: name.into(),
            spec: ConditionSpec::Simple(config),
        }
    }

    /// Creates a combination condition descriptor.
    #[must_use]
    pub fn combination(
        name: impl Into<String>,
        operation: LogicalOperation,
        children: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            spec: ConditionSpec::Combination {
                operation,
                children: children.iter().map(|c| (*c).to_string()).collect(),
            },
        }
    }
}

/// Tunables applied to every node of an arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaOptions {
    /// Maximum slices a simple condition tracks; further keys are dropped.
    pub max_slices: usize,
}

impl Default for ArenaOptions {
    fn default() -> Self {
        Self {
            max_slices: DEFAULT_MAX_SLICES,
        }
    }
}

//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use condgraph_engine::{ArenaOptions, ConditionDescriptor, DEFAULT_MAX_SLICES};
use condgraph_foundation::{Error, Result, SemanticLimit};
use condgraph_matcher::MatcherDescriptor;

/// Upper bounds on the size of one configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineLimits {
    /// Maximum number of matchers.
    pub max_matchers: usize,
    /// Maximum number of conditions.
    pub max_conditions: usize,
    /// Maximum number of slices one simple condition tracks at once.
    pub max_slices_per_condition: usize,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            max_matchers: 500,
            max_conditions: 300,
            max_slices_per_condition: DEFAULT_MAX_SLICES,
        }
    }
}

/// Everything needed to build a [`ConditionPipeline`](crate::ConditionPipeline).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Matchers, in index order.
    pub matchers: Vec<MatcherDescriptor>,
    /// Conditions, in index order.
    pub conditions: Vec<ConditionDescriptor>,
    /// Size limits.
    #[serde(default)]
    pub limits: PipelineLimits,
}

impl PipelineConfig {
    /// Creates an empty configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: MatcherDescriptor) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Adds a condition.
    #[must_use]
    pub fn with_condition(mut self, condition: ConditionDescriptor) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Replaces the limits.
    #[must_use]
    pub fn with_limits(mut self, limits: PipelineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the arena options implied by the limits.
    #[must_use]
    pub fn arena_options(&self) -> ArenaOptions {
        ArenaOptions {
            max_slices: self.limits.max_slices_per_condition,
        }
    }

    /// Checks the configuration against its limits.
    ///
    /// # Errors
    /// Returns [`ErrorKind::LimitExceeded`](condgraph_foundation::ErrorKind::LimitExceeded)
    /// if there are too many matchers or conditions.
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;

        if self.matchers.len() > limits.max_matchers {
            return Err(Error::limit_exceeded(SemanticLimit::MaxMatchers {
                limit: limits.max_matchers,
                actual: self.matchers.len(),
            }));
        }

        if self.conditions.len() > limits.max_conditions {
            return Err(Error::limit_exceeded(SemanticLimit::MaxConditions {
                limit: limits.max_conditions,
                actual: self.conditions.len(),
            }));
        }

        Ok(())
    }
}

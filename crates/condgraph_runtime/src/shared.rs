//! Lock-guarded pipeline access.
//!
//! One mutex covers an entire pass. Queries through a [`ConditionWizard`]
//! take the same lock, so they never observe a half-updated cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use condgraph_engine::DimensionQuery;
use condgraph_foundation::{ConditionState, LogEvent, Result};

use crate::config::PipelineConfig;
use crate::pipeline::{ConditionPipeline, PassSummary};

fn lock(inner: &Mutex<ConditionPipeline>) -> MutexGuard<'_, ConditionPipeline> {
    // A panic mid-pass is a contract violation; the state is still readable.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A pipeline shared between the event feed and its readers.
#[derive(Clone, Debug)]
pub struct SharedPipeline {
    inner: Arc<Mutex<ConditionPipeline>>,
}

impl SharedPipeline {
    /// Wraps a pipeline.
    #[must_use]
    pub fn new(pipeline: ConditionPipeline) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pipeline)),
        }
    }

    /// Builds and wraps a pipeline.
    ///
    /// # Errors
    /// Returns an error if the configuration is rejected.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        ConditionPipeline::from_config(config).map(Self::new)
    }

    /// Runs one event through the pipeline under the lock.
    pub fn on_log_event(&self, event: &LogEvent) -> PassSummary {
        lock(&self.inner).on_log_event(event)
    }

    /// Requests per-dimension change tracking for a named condition.
    ///
    /// # Errors
    /// Returns an error if no condition has that name.
    pub fn set_sliced(&self, name: &str) -> Result<()> {
        lock(&self.inner).set_sliced(name)
    }

    /// Runs a closure against the pipeline under the lock.
    pub fn with_pipeline<R>(&self, f: impl FnOnce(&ConditionPipeline) -> R) -> R {
        f(&lock(&self.inner))
    }

    /// Returns a read handle for aggregators.
    #[must_use]
    pub fn wizard(&self) -> ConditionWizard {
        ConditionWizard {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Cloneable read-only handle onto a shared pipeline.
#[derive(Clone, Debug)]
pub struct ConditionWizard {
    inner: Arc<Mutex<ConditionPipeline>>,
}

impl ConditionWizard {
    /// Returns the aggregate state of a named condition.
    #[must_use]
    pub fn is_condition_met(&self, name: &str) -> Option<ConditionState> {
        lock(&self.inner).condition_state(name)
    }

    /// Evaluates a named condition for the given keys.
    #[must_use]
    pub fn query(&self, name: &str, query: &DimensionQuery) -> Option<ConditionState> {
        lock(&self.inner).query(name, query)
    }
}

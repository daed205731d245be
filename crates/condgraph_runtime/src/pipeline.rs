//! The per-event pipeline: matcher pass, then condition pass.

use condgraph_engine::{ConditionArena, DimensionQuery, EvaluationContext};
use condgraph_foundation::{ConditionState, Error, LogEvent, MatchingState, Result};
use condgraph_matcher::MatcherSet;

use crate::config::PipelineConfig;

/// What one event did to the conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Number of conditions that were re-evaluated.
    pub evaluated: usize,
    /// Number of conditions whose aggregate changed.
    pub changed: usize,
}

/// Matchers and conditions of one configuration, driven event by event.
#[derive(Clone, Debug)]
pub struct ConditionPipeline {
    matchers: MatcherSet,
    arena: ConditionArena,
    ctx: EvaluationContext,
    verdicts: Vec<MatchingState>,
    relevant: Vec<bool>,
    events_processed: u64,
}

impl ConditionPipeline {
    /// Builds a pipeline, rejecting the configuration as a whole on any error.
    ///
    /// # Errors
    /// Returns an error if a limit is exceeded, a name is duplicated or
    /// unresolved, or the conditions form a cycle.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;

        let matchers = MatcherSet::from_descriptors(&config.matchers)?;
        let arena = ConditionArena::build(
            &config.conditions,
            matchers.name_index(),
            config.arena_options(),
        )?;
        let ctx = arena.new_context();

        log::info!(
            "pipeline loaded: {} matchers, {} conditions",
            matchers.len(),
            arena.len()
        );

        Ok(Self {
            verdicts: Vec::with_capacity(matchers.len()),
            relevant: Vec::with_capacity(arena.len()),
            matchers,
            arena,
            ctx,
            events_processed: 0,
        })
    }

    /// Feeds one event through the matchers and the affected conditions.
    pub fn on_log_event(&mut self, event: &LogEvent) -> PassSummary {
        self.events_processed += 1;

        if self.matchers.is_interested(event.tag_id) {
            self.matchers.evaluate(event, &mut self.verdicts);
        } else {
            self.verdicts.clear();
            self.verdicts
                .resize(self.matchers.len(), MatchingState::NotMatched);
        }

        self.arena.fill_relevance(&self.verdicts, &mut self.relevant);
        self.arena
            .evaluate_relevant(event, &self.verdicts, &mut self.ctx, &self.relevant);

        let summary = PassSummary {
            evaluated: self.relevant.iter().filter(|&&r| r).count(),
            changed: self.ctx.changed_indices().count(),
        };
        if summary.changed > 0 {
            log::debug!(
                "event {} (tag {}): {} of {} evaluated conditions changed",
                self.events_processed,
                event.tag_id,
                summary.changed,
                summary.evaluated
            );
        }
        summary
    }

    /// Returns the aggregate state of a named condition.
    #[must_use]
    pub fn condition_state(&self, name: &str) -> Option<ConditionState> {
        self.arena
            .index_of(name)
            .map(|index| self.ctx.state(index))
    }

    /// Evaluates a named condition for the given keys.
    #[must_use]
    pub fn query(&self, name: &str, query: &DimensionQuery) -> Option<ConditionState> {
        self.arena.query_by_name(name, query)
    }

    /// Requests per-dimension change tracking for a named condition and
    /// everything it depends on.
    ///
    /// # Errors
    /// Returns an error if no condition has that name.
    pub fn set_sliced(&mut self, name: &str) -> Result<()> {
        let index = self
            .arena
            .index_of(name)
            .ok_or_else(|| Error::unknown_condition(name))?;
        self.arena.set_sliced(index, true);
        Ok(())
    }

    /// Returns the names of conditions that changed on the last event.
    pub fn changed_conditions(&self) -> impl Iterator<Item = &str> {
        self.ctx
            .changed_indices()
            .map(|index| self.arena.node(index).name())
    }

    /// Returns the evaluation context of the last event.
    #[must_use]
    pub fn context(&self) -> &EvaluationContext {
        &self.ctx
    }

    /// Returns the condition arena.
    #[must_use]
    pub fn arena(&self) -> &ConditionArena {
        &self.arena
    }

    /// Returns the matchers.
    #[must_use]
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// Returns the number of events fed so far.
    #[must_use]
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }
}

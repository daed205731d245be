//! The per-event evaluation pass.
//!
//! A pass updates every node once, dependencies first, writing each node's
//! new aggregate into the state cache of an [`EvaluationContext`] and
//! flagging the nodes whose aggregate changed. The cache carries over from
//! one event to the next; the flags describe only the latest pass.

use condgraph_foundation::{ConditionState, LogEvent, MatchingState};

use crate::arena::ConditionArena;
use crate::node::{ConditionNode, NodeKind};

// =============================================================================
// Evaluation Context
// =============================================================================

/// State cache and change flags, co-indexed with the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationContext {
    states: Vec<ConditionState>,
    changed: Vec<bool>,
    slice_changed: Vec<bool>,
}

impl EvaluationContext {
    /// Creates a context of `len` unknown states.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![ConditionState::Unknown; len],
            changed: vec![false; len],
            slice_changed: vec![false; len],
        }
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the context has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state cache.
    #[must_use]
    pub fn states(&self) -> &[ConditionState] {
        &self.states
    }

    /// Returns the aggregate change flags of the last pass.
    #[must_use]
    pub fn changed(&self) -> &[bool] {
        &self.changed
    }

    /// Returns the slice change flags of the last pass.
    ///
    /// Only sliced nodes ever report a slice change.
    #[must_use]
    pub fn slice_changed(&self) -> &[bool] {
        &self.slice_changed
    }

    /// Returns the cached state of one node.
    #[must_use]
    pub fn state(&self, index: usize) -> ConditionState {
        self.states[index]
    }

    /// Returns true if the node's aggregate changed in the last pass.
    #[must_use]
    pub fn is_changed(&self, index: usize) -> bool {
        self.changed[index]
    }

    /// Returns true if any node changed in the last pass.
    #[must_use]
    pub fn any_changed(&self) -> bool {
        self.changed.iter().any(|&c| c)
    }

    /// Returns the indices of nodes whose aggregate changed in the last pass.
    pub fn changed_indices(&self) -> impl Iterator<Item = usize> {
        self.changed
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
    }

    fn begin_pass(&mut self) {
        self.changed.fill(false);
        self.slice_changed.fill(false);
    }
}

// =============================================================================
// Node Update
// =============================================================================

impl ConditionNode {
    /// Updates this node for one event, writing only its own slots.
    fn evaluate(
        &mut self,
        event: &LogEvent,
        verdicts: &[MatchingState],
        ctx: &mut EvaluationContext,
    ) {
        let index = self.index();
        let before = self.aggregate;

        let (state, slices_moved) = match &mut self.kind {
            NodeKind::Simple(simple) => {
                let outcome = simple.evaluate(&self.name, event, verdicts);
                (outcome.state.unwrap_or(before), outcome.slices_moved)
            }
            NodeKind::Combination(combination) => (
                combination.evaluate(&ctx.states),
                combination
                    .children()
                    .iter()
                    .any(|&child| ctx.slice_changed[child]),
            ),
            NodeKind::Pending => {
                unreachable!("condition {} evaluated before initialization", self.name)
            }
        };

        let changed = state != before;
        self.aggregate = state;
        ctx.states[index] = state;
        ctx.changed[index] = changed;
        ctx.slice_changed[index] = self.is_sliced() && (changed || slices_moved);
    }
}

// =============================================================================
// Evaluator
// =============================================================================

impl ConditionArena {
    /// Creates a context whose cache holds every node's current aggregate.
    #[must_use]
    pub fn new_context(&self) -> EvaluationContext {
        let mut ctx = EvaluationContext::new(self.len());
        for node in &self.nodes {
            ctx.states[node.index()] = node.is_condition_met();
        }
        ctx
    }

    /// Runs one pass over every node.
    ///
    /// # Panics
    /// Panics if the arena is not fully initialized or the context was not
    /// sized for this arena.
    pub fn evaluate(
        &mut self,
        event: &LogEvent,
        verdicts: &[MatchingState],
        ctx: &mut EvaluationContext,
    ) {
        self.run_pass(event, verdicts, ctx, None);
    }

    /// Runs one pass, skipping nodes whose `relevant` entry is false.
    ///
    /// Skipped nodes keep their cached state and report no change. Build the
    /// mask with [`fill_relevance`](Self::fill_relevance) to keep the result
    /// identical to a full pass.
    ///
    /// # Panics
    /// Panics if the arena is not fully initialized or the context or mask
    /// was not sized for this arena.
    pub fn evaluate_relevant(
        &mut self,
        event: &LogEvent,
        verdicts: &[MatchingState],
        ctx: &mut EvaluationContext,
        relevant: &[bool],
    ) {
        assert_eq!(relevant.len(), self.len(), "relevance mask size mismatch");
        self.run_pass(event, verdicts, ctx, Some(relevant));
    }

    /// Marks the nodes that depend on at least one matcher that matched.
    ///
    /// A node none of whose matchers matched cannot change, so skipping it is
    /// equivalent to evaluating it.
    pub fn fill_relevance(&self, verdicts: &[MatchingState], relevant: &mut Vec<bool>) {
        relevant.clear();
        relevant.extend(self.nodes.iter().map(|node| {
            node.used_matcher_indices()
                .iter()
                .any(|&m| verdicts[m].is_matched())
        }));
    }

    fn run_pass(
        &mut self,
        event: &LogEvent,
        verdicts: &[MatchingState],
        ctx: &mut EvaluationContext,
        relevant: Option<&[bool]>,
    ) {
        assert!(
            self.is_initialized(),
            "evaluation pass over an uninitialized arena"
        );
        assert_eq!(ctx.len(), self.len(), "evaluation context size mismatch");

        ctx.begin_pass();
        for &index in &self.order {
            if relevant.is_some_and(|r| !r[index]) {
                continue;
            }
            self.nodes[index].evaluate(event, verdicts, ctx);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

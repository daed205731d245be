//! Read-only queries for one slice.
//!
//! A query asks "what would this condition be for this dimension key?"
//! without disturbing any evaluation state. Intermediate results live in a
//! per-call memo, never in an [`EvaluationContext`](crate::EvaluationContext).

use std::collections::HashMap;

use condgraph_foundation::{ConditionState, DimensionKey};

use crate::arena::ConditionArena;
use crate::combination::combine;
use crate::node::NodeKind;

/// Dimension keys to query with, per condition name.
///
/// A condition with no key of its own falls back to the shared key, which is
/// projected onto each simple condition's dimensions. A condition with
/// neither answers with its aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DimensionQuery {
    keys: HashMap<String, DimensionKey>,
    shared: Option<DimensionKey>,
}

impl DimensionQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query that uses one key for every condition.
    #[must_use]
    pub fn for_slice(key: DimensionKey) -> Self {
        Self::new().with_shared_key(key)
    }

    /// Sets the key for one condition.
    #[must_use]
    pub fn with_key(mut self, condition: impl Into<String>, key: DimensionKey) -> Self {
        self.keys.insert(condition.into(), key);
        self
    }

    /// Sets the fallback key.
    #[must_use]
    pub fn with_shared_key(mut self, key: DimensionKey) -> Self {
        self.shared = Some(key);
        self
    }

    /// Returns the key used for a condition.
    #[must_use]
    pub fn key_for(&self, condition: &str) -> Option<&DimensionKey> {
        self.keys.get(condition).or(self.shared.as_ref())
    }
}

impl ConditionArena {
    /// Evaluates one condition for the given keys.
    ///
    /// Shared sub-conditions are evaluated once per call. Neither the arena
    /// nor any evaluation context is modified.
    ///
    /// # Panics
    /// Panics if the index is out of range or the node is not initialized.
    #[must_use]
    pub fn query(&self, index: usize, query: &DimensionQuery) -> ConditionState {
        let mut memo = vec![None; self.len()];
        self.query_with(index, query, &mut memo)
    }

    /// Evaluates a named condition for the given keys.
    ///
    /// Returns `None` if no condition has that name.
    #[must_use]
    pub fn query_by_name(&self, name: &str, query: &DimensionQuery) -> Option<ConditionState> {
        self.index_of(name).map(|index| self.query(index, query))
    }

    fn query_with(
        &self,
        index: usize,
        query: &DimensionQuery,
        memo: &mut [Option<ConditionState>],
    ) -> ConditionState {
        if let Some(state) = memo[index] {
            return state;
        }

        let node = &self.nodes[index];
        assert!(
            node.is_initialized(),
            "query on uninitialized condition {}",
            node.name()
        );

        let state = match node.kind() {
            NodeKind::Simple(simple) => {
                simple.query(query.key_for(node.name()), node.is_condition_met())
            }
            NodeKind::Combination(combination) => {
                let children: Vec<ConditionState> = combination
                    .children()
                    .iter()
                    .map(|&child| self.query_with(child, query, memo))
                    .collect();
                combine(combination.operation(), children)
            }
            NodeKind::Pending => unreachable!("initialized node {} has no rule", node.name()),
        };

        memo[index] = Some(state);
        state
    }
}

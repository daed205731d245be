//! Condition nodes.
//!
//! A node carries the identity and evaluation state of one condition. Nodes
//! never hold references to each other: dependencies are arena indices.

use std::collections::BTreeSet;

use condgraph_foundation::ConditionState;

use crate::combination::CombinationCondition;
use crate::simple::SimpleCondition;

/// The rule a node evaluates with.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Not yet resolved by the initializer.
    Pending,
    /// Driven by matcher verdicts.
    Simple(SimpleCondition),
    /// Driven by child conditions.
    Combination(CombinationCondition),
}

/// One condition in the arena.
#[derive(Clone, Debug)]
pub struct ConditionNode {
    pub(crate) name: String,
    index: usize,
    pub(crate) initialized: bool,
    pub(crate) used_matchers: BTreeSet<usize>,
    pub(crate) aggregate: ConditionState,
    sliced: bool,
    pub(crate) kind: NodeKind,
}

impl ConditionNode {
    /// Creates an uninitialized node.
    #[must_use]
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            initialized: false,
            used_matchers: BTreeSet::new(),
            aggregate: ConditionState::Unknown,
            sliced: false,
            kind: NodeKind::Pending,
        }
    }

    /// Returns the condition name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the arena index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true once the node and all its dependencies are resolved.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the non-dimensioned state as of the last evaluated event.
    #[must_use]
    pub fn is_condition_met(&self) -> ConditionState {
        self.aggregate
    }

    /// Returns every matcher index this node's subtree depends on.
    ///
    /// Only meaningful once the node is initialized.
    #[must_use]
    pub fn used_matcher_indices(&self) -> &BTreeSet<usize> {
        &self.used_matchers
    }

    /// Marks the node as sliced. Once true, the flag never reverts.
    pub fn set_sliced(&mut self, sliced: bool) {
        self.sliced |= sliced;
    }

    /// Returns true if per-dimension tracking was requested.
    #[must_use]
    pub fn is_sliced(&self) -> bool {
        self.sliced
    }

    /// Returns the node's rule.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the child condition indices (empty for simple nodes).
    #[must_use]
    pub fn children(&self) -> &[usize] {
        match &self.kind {
            NodeKind::Combination(c) => c.children(),
            NodeKind::Pending | NodeKind::Simple(_) => &[],
        }
    }

    /// Drops everything the initializer produced.
    pub(crate) fn reset(&mut self) {
        self.initialized = false;
        self.used_matchers.clear();
        self.aggregate = ConditionState::Unknown;
        self.kind = NodeKind::Pending;
    }
}

//! Combination conditions driven by the states of child conditions.

use condgraph_foundation::ConditionState;

use crate::config::LogicalOperation;

/// Resolved combination condition.
#[derive(Clone, Debug)]
pub struct CombinationCondition {
    operation: LogicalOperation,
    children: Vec<usize>,
}

impl CombinationCondition {
    /// Creates a combination over resolved child indices.
    #[must_use]
    pub fn new(operation: LogicalOperation, children: Vec<usize>) -> Self {
        Self {
            operation,
            children,
        }
    }

    /// Returns the operator.
    #[must_use]
    pub fn operation(&self) -> LogicalOperation {
        self.operation
    }

    /// Returns the child indices.
    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Combines the children's states as found in `states`.
    #[must_use]
    pub fn evaluate(&self, states: &[ConditionState]) -> ConditionState {
        combine(self.operation, self.children.iter().map(|&c| states[c]))
    }
}

/// Applies an operator to child states.
///
/// Any unknown child makes the result unknown. `Not` looks at the first child
/// only.
pub fn combine(
    operation: LogicalOperation,
    children: impl IntoIterator<Item = ConditionState>,
) -> ConditionState {
    let mut has_true = false;
    let mut has_false = false;
    let mut first = None;

    for state in children {
        first.get_or_insert(state);
        match state {
            ConditionState::Unknown => return ConditionState::Unknown,
            ConditionState::True => has_true = true,
            ConditionState::False => has_false = true,
        }
    }

    let result = match operation {
        LogicalOperation::And => !has_false,
        LogicalOperation::Or => has_true,
        LogicalOperation::Not => first == Some(ConditionState::False),
        LogicalOperation::Nand => has_false,
        LogicalOperation::Nor => !has_true,
    };
    ConditionState::from_bool(result)
}

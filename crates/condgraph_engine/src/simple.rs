//! Simple (atomic) conditions driven directly by matcher verdicts.
//!
//! A simple condition is started by one matcher and stopped by another,
//! optionally per dimension key. Each key holds a nesting count; the key is
//! held while its count is positive. The aggregate state is `True` while any
//! key is held.

use std::collections::HashMap;

use condgraph_foundation::{ConditionState, DimensionKey, FieldId, LogEvent, MatchingState};

use crate::config::InitialValue;

/// Result of feeding one event to a simple condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SimpleOutcome {
    /// New aggregate state, or `None` if the event left it untouched.
    pub state: Option<ConditionState>,
    /// Whether any slice started or stopped being held.
    pub slices_moved: bool,
}

impl SimpleOutcome {
    const UNTOUCHED: Self = Self {
        state: None,
        slices_moved: false,
    };
}

/// Resolved simple condition.
#[derive(Clone, Debug)]
pub struct SimpleCondition {
    start: Option<usize>,
    stop: Option<usize>,
    stop_all: Option<usize>,
    count_nesting: bool,
    dimensions: Vec<FieldId>,
    initial_value: InitialValue,
    max_slices: usize,
    /// Nesting count per held key. Keys are removed when they reach zero.
    slices: HashMap<DimensionKey, u32>,
}

impl SimpleCondition {
    /// Creates a resolved simple condition from matcher indices.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start: Option<usize>,
        stop: Option<usize>,
        stop_all: Option<usize>,
        count_nesting: bool,
        dimensions: Vec<FieldId>,
        initial_value: InitialValue,
        max_slices: usize,
    ) -> Self {
        Self {
            start,
            stop,
            stop_all,
            count_nesting,
            dimensions,
            initial_value,
            max_slices,
            slices: HashMap::new(),
        }
    }

    /// Returns the matcher indices this condition reads directly.
    pub fn matcher_indices(&self) -> impl Iterator<Item = usize> + use<> {
        [self.start, self.stop, self.stop_all].into_iter().flatten()
    }

    /// Returns the dimension fields.
    #[must_use]
    pub fn dimensions(&self) -> &[FieldId] {
        &self.dimensions
    }

    /// Returns the state reported before any event.
    #[must_use]
    pub fn initial_state(&self) -> ConditionState {
        match self.initial_value {
            InitialValue::Unknown => ConditionState::Unknown,
            InitialValue::False => ConditionState::False,
        }
    }

    /// Returns the nesting count of a key (zero if not held).
    #[must_use]
    pub fn slice_count(&self, key: &DimensionKey) -> u32 {
        self.slices.get(key).copied().unwrap_or(0)
    }

    /// Returns the currently held keys.
    pub fn held_slices(&self) -> impl Iterator<Item = &DimensionKey> {
        self.slices.keys()
    }

    fn verdict(verdicts: &[MatchingState], index: Option<usize>) -> bool {
        index.is_some_and(|i| verdicts[i].is_matched())
    }

    fn aggregate(&self) -> ConditionState {
        ConditionState::from_bool(!self.slices.is_empty())
    }

    /// Applies one event.
    pub(crate) fn evaluate(
        &mut self,
        name: &str,
        event: &LogEvent,
        verdicts: &[MatchingState],
    ) -> SimpleOutcome {
        if Self::verdict(verdicts, self.stop_all) {
            let had_slices = !self.slices.is_empty();
            self.slices.clear();
            log::trace!("condition {name}: stop-all");
            return SimpleOutcome {
                state: Some(ConditionState::False),
                slices_moved: had_slices,
            };
        }

        // Stop wins when both fire on the same event.
        let is_start = match (
            Self::verdict(verdicts, self.start),
            Self::verdict(verdicts, self.stop),
        ) {
            (_, true) => false,
            (true, false) => true,
            (false, false) => return SimpleOutcome::UNTOUCHED,
        };

        let Some(key) = event.dimension_key(&self.dimensions) else {
            log::debug!(
                "condition {name}: event tag {} lacks dimension fields {:?}",
                event.tag_id,
                self.dimensions
            );
            return SimpleOutcome::UNTOUCHED;
        };

        let slices_moved = if is_start {
            self.handle_start(name, key)
        } else {
            self.handle_stop(&key)
        };

        SimpleOutcome {
            state: Some(self.aggregate()),
            slices_moved,
        }
    }

    fn handle_start(&mut self, name: &str, key: DimensionKey) -> bool {
        if let Some(count) = self.slices.get_mut(&key) {
            if self.count_nesting {
                *count = count.saturating_add(1);
            }
            return false;
        }

        if self.slices.len() >= self.max_slices {
            log::warn!(
                "condition {name}: slice limit {} reached, dropping {key}",
                self.max_slices
            );
            return false;
        }

        self.slices.insert(key, 1);
        true
    }

    fn handle_stop(&mut self, key: &DimensionKey) -> bool {
        let Some(count) = self.slices.get_mut(key) else {
            return false;
        };

        if self.count_nesting {
            *count -= 1;
        } else {
            *count = 0;
        }

        if *count == 0 {
            self.slices.remove(key);
            true
        } else {
            false
        }
    }

    /// Answers for one slice without touching any state.
    ///
    /// `key` is projected onto this condition's dimensions; with no key, no
    /// dimensions, or a failed projection the aggregate is returned.
    #[must_use]
    pub(crate) fn query(
        &self,
        key: Option<&DimensionKey>,
        aggregate: ConditionState,
    ) -> ConditionState {
        if self.dimensions.is_empty() {
            return aggregate;
        }
        let Some(slice) = key.and_then(|k| k.project(&self.dimensions)) else {
            return aggregate;
        };

        if self.slice_count(&slice) > 0 {
            ConditionState::True
        } else if aggregate.is_unknown() {
            ConditionState::Unknown
        } else {
            ConditionState::False
        }
    }
}

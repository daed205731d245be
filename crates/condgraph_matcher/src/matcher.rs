//! Atom matchers and the per-event verdict vector.
//!
//! Matchers always run before conditions: [`MatcherSet::evaluate`] fills one
//! verdict per registered matcher, and conditions only ever see a fully
//! computed vector.

use std::collections::{HashMap, HashSet};

use condgraph_foundation::{Error, ErrorKind, FieldId, FieldValue, LogEvent, MatchingState, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Descriptors
// =============================================================================

/// A predicate over one event field.
///
/// A missing field never satisfies a predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldPredicate {
    /// Field is present and equal to the value.
    Eq(FieldId, FieldValue),
    /// Field is present and different from the value.
    NotEq(FieldId, FieldValue),
}

impl FieldPredicate {
    /// Tests the predicate against an event.
    #[must_use]
    pub fn test(&self, event: &LogEvent) -> bool {
        match self {
            Self::Eq(field, expected) => event.field(*field) == Some(expected),
            Self::NotEq(field, expected) => event.field(*field).is_some_and(|v| v != expected),
        }
    }
}

/// Configuration of one atom matcher.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatcherDescriptor {
    /// Unique matcher name.
    pub name: String,
    /// Tag id the event must carry.
    pub tag_id: u32,
    /// Field predicates, all of which must hold.
    pub predicates: Vec<FieldPredicate>,
}

impl MatcherDescriptor {
    /// Creates a descriptor matching every event with the given tag.
    #[must_use]
    pub fn new(name: impl Into<String>, tag_id: u32) -> Self {
        Self {
            name: name.into(),
            tag_id,
            predicates: Vec::new(),
        }
    }

    /// Requires a field to equal a value.
    #[must_use]
    pub fn field_eq(mut self, field: FieldId, value: impl Into<FieldValue>) -> Self {
        self.predicates.push(FieldPredicate::Eq(field, value.into()));
        self
    }

    /// Requires a field to differ from a value.
    #[must_use]
    pub fn field_ne(mut self, field: FieldId, value: impl Into<FieldValue>) -> Self {
        self.predicates
            .push(FieldPredicate::NotEq(field, value.into()));
        self
    }
}

// =============================================================================
// Atom Matcher
// =============================================================================

/// A resolved matcher at a fixed index.
#[derive(Clone, Debug)]
pub struct AtomMatcher {
    name: String,
    index: usize,
    tag_id: u32,
    predicates: Vec<FieldPredicate>,
}

impl AtomMatcher {
    /// Returns the matcher name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the matcher index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the tag this matcher listens to.
    #[must_use]
    pub fn tag_id(&self) -> u32 {
        self.tag_id
    }

    /// Computes the verdict for one event.
    #[must_use]
    pub fn matches(&self, event: &LogEvent) -> MatchingState {
        MatchingState::from_bool(
            event.tag_id == self.tag_id && self.predicates.iter().all(|p| p.test(event)),
        )
    }
}

// =============================================================================
// Matcher Set
// =============================================================================

/// All matchers of one configuration, addressed by dense index.
#[derive(Clone, Debug, Default)]
pub struct MatcherSet {
    matchers: Vec<AtomMatcher>,
    name_index: HashMap<String, usize>,
    tags: HashSet<u32>,
}

impl MatcherSet {
    /// Builds the set, assigning indices in descriptor order.
    ///
    /// # Errors
    /// Returns an error if two descriptors share a name.
    pub fn from_descriptors(descriptors: &[MatcherDescriptor]) -> Result<Self> {
        let mut set = Self::default();

        for (index, desc) in descriptors.iter().enumerate() {
            if set.name_index.insert(desc.name.clone(), index).is_some() {
                log::warn!("duplicate matcher {}", desc.name);
                return Err(Error::new(ErrorKind::DuplicateMatcher(desc.name.clone())));
            }
            set.tags.insert(desc.tag_id);
            set.matchers.push(AtomMatcher {
                name: desc.name.clone(),
                index,
                tag_id: desc.tag_id,
                predicates: desc.predicates.clone(),
            });
        }

        Ok(set)
    }

    /// Returns the number of matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if there are no matchers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Returns the name to index map.
    #[must_use]
    pub fn name_index(&self) -> &HashMap<String, usize> {
        &self.name_index
    }

    /// Looks up a matcher by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AtomMatcher> {
        self.name_index.get(name).map(|&i| &self.matchers[i])
    }

    /// Returns true if any matcher listens to the tag.
    #[must_use]
    pub fn is_interested(&self, tag_id: u32) -> bool {
        self.tags.contains(&tag_id)
    }

    /// Computes every matcher's verdict for one event.
    ///
    /// The vector is resized to the number of matchers and every entry is
    /// overwritten before returning.
    pub fn evaluate(&self, event: &LogEvent, verdicts: &mut Vec<MatchingState>) {
        verdicts.clear();
        verdicts.extend(self.matchers.iter().map(|m| m.matches(event)));
        log::trace!(
            "tag {} matched {} of {} matchers",
            event.tag_id,
            verdicts.iter().filter(|v| v.is_matched()).count(),
            verdicts.len()
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

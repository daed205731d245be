//! Tri-state values produced by matchers and conditions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of a condition as of the last evaluated event.
///
/// `Unknown` means "not yet determinable" and is distinct from `False`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConditionState {
    /// Not enough history to decide.
    #[default]
    Unknown,
    /// The condition does not hold.
    False,
    /// The condition holds.
    True,
}

impl ConditionState {
    /// Converts a boolean into a known state.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    /// Returns true if the state is `True`.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns true if the state is `Unknown`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns the boolean value, or `None` when unknown.
    #[must_use]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::False => Some(false),
            Self::True => Some(true),
        }
    }
}

impl From<bool> for ConditionState {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::Display for ConditionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::False => write!(f, "false"),
            Self::True => write!(f, "true"),
        }
    }
}

/// The verdict of one matcher for one event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchingState {
    /// The matcher has not been computed for this event.
    #[default]
    Unknown,
    /// The event did not match.
    NotMatched,
    /// The event matched.
    Matched,
}

impl MatchingState {
    /// Converts a boolean into a computed verdict.
    #[must_use]
    pub const fn from_bool(matched: bool) -> Self {
        if matched {
            Self::Matched
        } else {
            Self::NotMatched
        }
    }

    /// Returns true if the verdict is `Matched`.
    #[must_use]
    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl fmt::Display for MatchingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::NotMatched => write!(f, "not-matched"),
            Self::Matched => write!(f, "matched"),
        }
    }
}

//! Error types for condgraph.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Configuration problems are reported through these types; contract
//! violations at evaluation time are programming errors and panic instead.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout condgraph.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for condgraph operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records one more frame of the dependency path the error travelled.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.context
            .get_or_insert_with(ErrorContext::new)
            .stack
            .push(frame.into());
        self
    }

    /// Creates an unknown condition reference error.
    #[must_use]
    pub fn unknown_condition(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCondition(name.into()))
    }

    /// Creates an unknown matcher reference error.
    #[must_use]
    pub fn unknown_matcher(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownMatcher(name.into()))
    }

    /// Creates a dependency cycle error.
    #[must_use]
    pub fn cycle(condition: impl Into<String>) -> Self {
        Self::new(ErrorKind::DependencyCycle(condition.into()))
    }

    /// Creates an invalid condition error.
    #[must_use]
    pub fn invalid_condition(condition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCondition {
            condition: condition.into(),
            reason: reason.into(),
        })
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Returns true if this error reports a dependency cycle.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self.kind, ErrorKind::DependencyCycle(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A condition referenced a condition name that does not exist.
    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    /// A condition referenced a matcher name that does not exist.
    #[error("unknown matcher: {0}")]
    UnknownMatcher(String),

    /// The condition graph contains a cycle through this condition.
    #[error("dependency cycle detected at condition {0}")]
    DependencyCycle(String),

    /// Two conditions share a name, so they would share an index.
    #[error("duplicate condition: {0}")]
    DuplicateCondition(String),

    /// Two matchers share a name.
    #[error("duplicate matcher: {0}")]
    DuplicateMatcher(String),

    /// A condition descriptor is malformed.
    #[error("invalid condition {condition}: {reason}")]
    InvalidCondition {
        /// The offending condition.
        condition: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The descriptor list or an init context does not line up with the arena.
    #[error("descriptor mismatch: expected {expected} entries, got {actual}")]
    DescriptorMismatch {
        /// Number of nodes in the arena.
        expected: usize,
        /// Number of descriptors or context slots supplied.
        actual: usize,
    },

    /// Semantic limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File I/O failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Configuration limits that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Too many matchers in one configuration.
    MaxMatchers {
        /// The configured limit.
        limit: usize,
        /// The number requested.
        actual: usize,
    },
    /// Too many conditions in one configuration.
    MaxConditions {
        /// The configured limit.
        limit: usize,
        /// The number requested.
        actual: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxMatchers { limit, actual } => {
                write!(f, "max matchers ({limit}) exceeded: {actual}")
            }
            Self::MaxConditions { limit, actual } => {
                write!(f, "max conditions ({limit}) exceeded: {actual}")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Configuration or file the error came from.
    pub source: Option<String>,
    /// Dependency path that led to the error, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  via {frame}")?;
            }
        }
        Ok(())
    }
}

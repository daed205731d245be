//! Core types for condgraph.
//!
//! This crate provides:
//! - [`ConditionState`] and [`MatchingState`] - Tri-state values of conditions and matchers
//! - [`DimensionKey`] - Structural identifiers for one slice of a dimensioned condition
//! - [`LogEvent`] - An already-parsed event as seen by matchers and conditions
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dimension;
pub mod error;
pub mod event;
pub mod state;

pub use dimension::{DimensionField, DimensionKey, FieldId, FieldValue};
pub use error::{Error, ErrorContext, ErrorKind, Result, SemanticLimit};
pub use event::LogEvent;
pub use state::{ConditionState, MatchingState};

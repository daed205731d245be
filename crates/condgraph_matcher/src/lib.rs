//! Event matchers for condgraph.
//!
//! This crate provides:
//! - [`MatcherDescriptor`] - Configuration of one atom matcher
//! - [`AtomMatcher`] - A tag plus field predicates, evaluated against one event
//! - [`MatcherSet`] - All matchers of a configuration, producing the verdict vector

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod matcher;

pub use matcher::{AtomMatcher, FieldPredicate, MatcherDescriptor, MatcherSet};

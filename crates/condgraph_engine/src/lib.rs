//! Condition tracker DAG for condgraph.
//!
//! This crate provides:
//! - [`ConditionArena`] - Index-addressed owner of every condition node
//! - [`Initializer`] - Name resolution, cycle detection, and evaluation order
//! - [`EvaluationContext`] - Per-event state cache and change flags
//! - [`DimensionQuery`] - Read-only per-slice queries
//! - [`SimpleCondition`] and [`CombinationCondition`] - The two node rules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod combination;
pub mod config;
pub mod evaluate;
pub mod init;
pub mod node;
pub mod query;
pub mod simple;

pub use arena::ConditionArena;
pub use combination::{CombinationCondition, combine};
pub use config::{
    ArenaOptions, ConditionDescriptor, ConditionSpec, DEFAULT_MAX_SLICES, InitialValue,
    LogicalOperation, SimpleConditionConfig,
};
pub use evaluate::EvaluationContext;
pub use init::{InitContext, Initializer};
pub use node::{ConditionNode, NodeKind};
pub use query::DimensionQuery;
pub use simple::SimpleCondition;

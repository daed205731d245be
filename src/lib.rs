//! condgraph - Condition tracking over log event streams
//!
//! This crate re-exports all layers of the condgraph system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: condgraph_runtime    — Pipeline, shared access, config serialization
//! Layer 2: condgraph_engine     — Condition arena, initializer, evaluator, queries
//! Layer 1: condgraph_matcher    — Atom matchers and per-event verdicts
//! Layer 0: condgraph_foundation — Core types (ConditionState, DimensionKey, Error)
//! ```

pub use condgraph_engine as engine;
pub use condgraph_foundation as foundation;
pub use condgraph_matcher as matcher;
pub use condgraph_runtime as runtime;

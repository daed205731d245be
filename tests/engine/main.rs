//! Integration tests for Layer 2: Engine
//!
//! Tests for arena initialization, evaluation passes, and dimensioned queries.

mod evaluation;
mod queries;

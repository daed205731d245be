//! Pipeline orchestration and serialization for condgraph.
//!
//! This crate provides:
//! - [`PipelineConfig`] - Matchers, conditions, and limits of one configuration
//! - [`ConditionPipeline`] - Matcher pass followed by a pruned condition pass
//! - [`SharedPipeline`] and [`ConditionWizard`] - Lock-guarded access for aggregators
//! - [`serialize`] - `MessagePack` persistence of configurations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod pipeline;
pub mod serialize;
pub mod shared;

pub use config::{PipelineConfig, PipelineLimits};
pub use pipeline::{ConditionPipeline, PassSummary};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
pub use shared::{ConditionWizard, SharedPipeline};

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Largest-remainder apportionment (deterministic allocation math).
pub mod allocation;
/// Composition definitions and sampler options.
pub mod config;
/// Centralized constants used across allocation, pool, and sources.
pub mod constants;
/// Question, request, and result types.
pub mod data;
/// Result skew/telemetry helpers.
pub mod metrics;
/// Immutable grouped question inventory.
pub mod pool;
/// Composition lookup table.
pub mod registry;
/// Sampler implementation and public sampling API.
pub mod sampler;
/// Question feed traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Fixture builders shared by tests.
pub mod utils;

mod errors;

pub use allocation::{Allocation, apportion, renormalize};
pub use config::{Composition, SamplerOptions, ShortfallPolicy};
pub use data::{
    Difficulty, Group, GroupBreakdown, GroupScope, Question, QuestionFilter, SamplingRequest,
    SamplingResult, Weighting,
};
pub use errors::SampleError;
pub use metrics::{GroupShare, GroupSkew};
pub use pool::QuestionPool;
pub use registry::CompositionRegistry;
pub use sampler::{DeterministicRng, StratifiedSampler};
pub use source::{InMemorySource, JsonSnapshotSource, QuestionFeed, QuestionSource, load_pool};
pub use types::{CompositionId, GroupId, QuestionId, SourceId, TopicId};

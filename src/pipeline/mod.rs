//! High-level pipelines: graph building, polysemy profiling and sense linking.
//!
//! Each stage takes the previous stage's output by value or reference and
//! returns the next one; a stage either completes or aborts with an error.

pub mod build_graph;
pub mod link_senses;
pub mod polysemy_profiles;

pub use build_graph::GraphBuildPipeline;
pub use link_senses::SenseLinkPipeline;
pub use polysemy_profiles::PolysemyProfilePipeline;

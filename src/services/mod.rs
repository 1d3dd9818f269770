//! Service layer: pipeline orchestration over the domain ports.

pub mod pipeline;

pub use pipeline::Pipeline;

//! Huepass Core: domain layer for the real-time grading pass.
//!
//! This crate contains the grading parameter model, the per-pixel stage
//! library, and the pipeline that chains them. No GPU device or UI
//! framework dependencies; hosts upload [`GradeUniforms`] themselves.

pub mod color;
pub mod config;
pub mod error;
pub mod grading;
pub mod image;
pub mod params;
pub mod transform;

// Re-exports for convenience.
pub use color::ColorSample;
pub use config::{PipelineConfig, WritePolicy};
pub use error::GradeError;
pub use image::{BitDepth, GradingImage, SampleSource};
pub use params::command::ParamCommand;
pub use params::field::{ParamDescriptor, ParamId, ParamKind, ParamValue};
pub use params::shared::{SharedGradeParameters, UniformSync};
pub use params::{GradeParameters, HUE_BUCKETS};
pub use transform::evaluate::evaluate_transform;
pub use transform::pipeline::GradingPipeline;
pub use transform::uniforms::GradeUniforms;

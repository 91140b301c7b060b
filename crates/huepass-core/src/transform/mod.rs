//! Transform pipeline: stage ordering, per-pixel evaluation, frame grading
//! and the packed uniform block.

pub mod evaluate;
pub mod pipeline;
pub mod uniforms;

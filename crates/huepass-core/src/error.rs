use crate::params::field::{ParamId, ParamKind};

/// Errors raised by the parameter store and the frame-level pipeline entry
/// points. Per-pixel evaluation never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error("{param} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        param: ParamId,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),
    #[error("{param} expects a {expected} value")]
    KindMismatch { param: ParamId, expected: ParamKind },
    #[error("band index {index} out of range for {param}")]
    BandIndex { param: ParamId, index: usize },
    #[error("image buffer holds {actual} pixels, expected {expected}")]
    ImageSize { expected: usize, actual: usize },
    #[error("source image is empty")]
    EmptyImage,
}

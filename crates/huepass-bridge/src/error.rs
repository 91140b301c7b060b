use huepass_core::GradeError;

/// Errors raised while decoding or applying a UI message.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex color {input:?}: {reason}")]
    Hex { input: String, reason: String },

    #[error(transparent)]
    Grade(#[from] GradeError),
}

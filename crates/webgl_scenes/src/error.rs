//! Scene-layer error types.

use webgl_math::MathError;

/// Errors that can occur while evaluating scenes.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A matrix or camera computation failed.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// The scene configuration is out of range.
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),

    /// A vertex ended up at or behind the camera plane (`w <= 0`).
    #[error("vertex {index} is behind the camera (w = {w})")]
    BehindCamera {
        /// Position of the vertex in the input.
        index: usize,
        /// The homogeneous `w` after transformation.
        w: f32,
    },

    /// A frame loop was asked to run without a frame limit.
    #[error("headless frame loop needs max_frames > 0")]
    UnboundedRun,

    /// Failed to read a config file or write output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or produce JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to encode frames to MessagePack.
    #[error("failed to encode frames: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode frames from MessagePack.
    #[error("failed to decode frames: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

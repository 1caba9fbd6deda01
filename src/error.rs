//! Engine error taxonomy
//!
//! Only `DegenerateTransform` ever reaches a caller as a hard failure.
//! `MissingActiveWorld` and `StackUnderflow` exist so the places that absorb
//! them can log a consistent message.

/// Errors raised by the transform, camera and engine layers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Camera scale or matrix determinant is zero (or not finite).
    /// Fatal for the camera that produced it.
    #[error("degenerate transform: {reason}")]
    DegenerateTransform { reason: String },

    /// A tick or input event arrived while no world was active.
    #[error("no active world")]
    MissingActiveWorld,

    /// `pop()` called on a transform stack already at depth 0.
    #[error("transform stack underflow (push/pop mismatch)")]
    StackUnderflow,
}

impl EngineError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        EngineError::DegenerateTransform { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

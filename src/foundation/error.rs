/// Convenience result type used across Photostrip.
pub type PhotostripResult<T> = Result<T, PhotostripError>;

/// Top-level error taxonomy used by library APIs.
///
/// Rejected session transitions are not errors; see [`crate::Transition`].
#[derive(thiserror::Error, Debug)]
pub enum PhotostripError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The capture device could not produce a still (permissions, missing device, ...).
    #[error("capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// The strip could not be composited (missing frame, asset load or decode failure).
    #[error("composite failed: {0}")]
    CompositeFailed(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotostripError {
    /// Build a [`PhotostripError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotostripError::CaptureUnavailable`] value.
    pub fn capture_unavailable(msg: impl Into<String>) -> Self {
        Self::CaptureUnavailable(msg.into())
    }

    /// Build a [`PhotostripError::CompositeFailed`] value.
    pub fn composite_failed(msg: impl Into<String>) -> Self {
        Self::CompositeFailed(msg.into())
    }

    /// Build a [`PhotostripError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

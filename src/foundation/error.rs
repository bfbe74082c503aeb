/// Convenience result type used across pixel-ripple.
pub type RippleResult<T> = Result<T, RippleError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Most of the engine is infallible by construction: configuration is clamped rather than
/// rejected, and degenerate surfaces yield empty grids. The variants below cover the few
/// boundaries that can genuinely fail.
#[derive(thiserror::Error, Debug)]
pub enum RippleError {
    /// Invalid user-provided data that cannot be clamped into range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while allocating or reading back a raster surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RippleError {
    /// Build a [`RippleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RippleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RippleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result alias used across the crate.
pub type WaveFillResult<T> = Result<T, WaveFillError>;

/// Error taxonomy for engine construction, configuration and rendering.
#[derive(thiserror::Error, Debug)]
pub enum WaveFillError {
    /// Fatal setup problems: missing mask, unusable canvas. Construction fails.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Rejected configuration values (zero divisors, non-positive wavelength).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Per-frame rendering failures. Recoverable: the frame is skipped.
    #[error("render error: {0}")]
    Render(String),

    /// Passthrough for wrapped external errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WaveFillError {
    /// Build a [`WaveFillError::Configuration`] from a message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`WaveFillError::InvalidParameter`] from a message.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`WaveFillError::Render`] from a message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

//! Error taxonomy for vignette.

/// Convenience result type used across the engine.
pub type VignetteResult<T> = Result<T, VignetteError>;

/// Top-level error taxonomy for segmentation, layout, and scene composition.
#[derive(thiserror::Error, Debug)]
pub enum VignetteError {
    /// Errors found while validating scene components, style documents, or
    /// raster dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Text layout could not be produced at any permitted font size.
    #[error("layout error: {0}")]
    Layout(String),

    /// Static layer cache protocol violation.
    #[error("cache error: {0}")]
    Cache(String),

    /// Errors while reading or writing JSON documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped errors from lower-level libraries.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VignetteError {
    /// Build a validation error from any printable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a layout error from any printable message.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a cache error from any printable message.
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Build a serialization error from any printable message.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

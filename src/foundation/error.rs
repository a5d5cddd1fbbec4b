/// Convenience result type used across the crate.
pub type FeatherResult<T> = Result<T, FeatherError>;

/// Error taxonomy for mask sampling, raster allocation, and filtering.
///
/// Public graphic entry points convert these into absent results; the variants exist so internal
/// callers and logs can tell resource exhaustion apart from bad input.
#[derive(thiserror::Error, Debug)]
pub enum FeatherError {
    /// Invalid mask data or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating or sampling animated mask properties.
    #[error("animation error: {0}")]
    Animation(String),

    /// A raster surface could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// The blur filter could not be initialized or applied.
    #[error("filter error: {0}")]
    Filter(String),

    /// Errors while compositing a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FeatherError {
    /// Build a [`FeatherError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FeatherError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FeatherError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`FeatherError::Filter`] value.
    pub fn filter(msg: impl Into<String>) -> Self {
        Self::Filter(msg.into())
    }

    /// Build a [`FeatherError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Return `true` for failures caused by running out of raster resources.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, Self::Allocation(_) | Self::Filter(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

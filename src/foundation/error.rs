/// Result alias used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error type for composition setup, animation construction and frame evaluation.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Structural problem in a composition, props or timing declaration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation parameters (rates, curves, breakpoints).
    #[error("animation error: {0}")]
    Animation(String),

    /// Failure while evaluating a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Props or scene (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ReelError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

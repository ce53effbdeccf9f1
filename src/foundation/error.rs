/// Convenience result type used across splitreel.
pub type SplitreelResult<T> = Result<T, SplitreelError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SplitreelError {
    /// Invalid engine or session configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Score data that could not be loaded at all.
    #[error("score error: {0}")]
    Score(String),

    /// Partition or pool state that violates a layout invariant.
    #[error("layout error: {0}")]
    Layout(String),

    /// Failures while drawing clips into the frame canvas.
    #[error("render error: {0}")]
    Render(String),

    /// Failures reported by a frame sink during capture.
    #[error("sink error: {0}")]
    Sink(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplitreelError {
    /// Build a [`SplitreelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SplitreelError::Score`] value.
    pub fn score(msg: impl Into<String>) -> Self {
        Self::Score(msg.into())
    }

    /// Build a [`SplitreelError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`SplitreelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SplitreelError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

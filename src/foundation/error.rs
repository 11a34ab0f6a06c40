/// Convenience result type used across writepad.
pub type WritepadResult<T> = Result<T, WritepadError>;

/// Top-level error taxonomy for the fallible parts of the crate.
///
/// The stroke recorder and the session validator never produce these: the recorder absorbs
/// out-of-sequence input and the validator reports problems inside its verdict.
#[derive(thiserror::Error, Debug)]
pub enum WritepadError {
    /// Invalid caller-provided data or an operation issued in the wrong state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Offline cache install/lookup failures.
    #[error("cache error: {0}")]
    Cache(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WritepadError {
    /// Build a [`WritepadError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WritepadError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WritepadError::Cache`] value.
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Build a [`WritepadError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WritepadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

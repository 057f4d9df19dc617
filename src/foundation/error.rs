/// Convenience result type used across the crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Error taxonomy for loading and planning APIs.
///
/// Cascade resolution itself never fails: missing sections, dangling references
/// and cycles all degrade to "no override". Errors only surface while reading
/// override tables and storyboards.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// Structurally invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when deserializing tables or storyboards.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayoutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<json5::Error> for LayoutError {
    fn from(err: json5::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

//! Error types for promptfold

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`PromptError`]
pub type Result<T> = std::result::Result<T, PromptError>;

/// Main error type for promptfold
#[derive(Debug, Error)]
pub enum PromptError {
    /// No registered adapter accepts the model name
    #[error("No valid prompt adapter for {0}")]
    NoAdapterFound(String),

    /// A message carries a role outside the recognized set
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// A template string is not a single-placeholder format pattern
    #[error("Invalid template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// An adapter definition is inconsistent
    #[error("Invalid adapter: {0}")]
    InvalidAdapter(String),

    /// Configuration parse error
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PromptError {
    pub(crate) fn invalid_template(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PromptError::NoAdapterFound("llama".into());
        assert_eq!(err.to_string(), "No valid prompt adapter for llama");

        let err = PromptError::UnknownRole("bogus".into());
        assert_eq!(err.to_string(), "Unknown role: bogus");

        let err = PromptError::invalid_template("{x}", "named fields are not supported");
        assert_eq!(
            err.to_string(),
            "Invalid template \"{x}\": named fields are not supported"
        );
    }
}

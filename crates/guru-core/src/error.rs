//! Error types for the Guru diagnostic core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the diagnostic core.
///
/// Provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Collaborator failures
/// are deliberately a single string-carrying variant: the core never
/// branches on *why* a collaborator failed, only on the fact that it did.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GuruError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A collaborator capability call failed (classifier, question
    /// generator, model service, ...)
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// A retrieval backend call failed (vector store, course catalog,
    /// web search, session archive)
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GuruError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Creates a Retrieval error
    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from an external collaborator or
    /// retrieval backend rather than the core itself.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator(_) | Self::Retrieval(_))
    }
}

impl From<serde_json::Error> for GuruError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GuruError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error for infrastructure seams
impl From<anyhow::Error> for GuruError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<String> for GuruError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, GuruError>`.
pub type Result<T> = std::result::Result<T, GuruError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helper() {
        let err = GuruError::not_found("session", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: session 'abc'");
    }

    #[test]
    fn test_collaborator_classification() {
        assert!(GuruError::collaborator("classifier down").is_collaborator());
        assert!(GuruError::retrieval("vector store timeout").is_collaborator());
        assert!(!GuruError::internal("oops").is_collaborator());
    }
}

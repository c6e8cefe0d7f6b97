//! Error types for the cadchat client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole cadchat client.
///
/// Session-level failures (`Fetch`, `HistoricalResult`, `EmptyQuery`) become
/// user-visible messages. Rendering failures (`InvalidGeometryPayload`,
/// `Render`) are contained by the scene builder and only ever logged.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CadError {
    /// Network or backend failure on any request
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// A past message recorded a backend error
    #[error("{0}")]
    HistoricalResult(String),

    /// Malformed shape / mesh-instance pair
    #[error("Invalid geometry payload: {0}")]
    InvalidGeometryPayload(String),

    /// The viewer engine failed while tessellating or rendering
    #[error("Render error: {0}")]
    Render(String),

    /// Export format not offered for the current render mode
    #[error("Export format '{format}' is not available for {mode} results")]
    UnsupportedExportFormat { format: String, mode: String },

    /// A download was requested while nothing is displayed
    #[error("No result is currently displayed")]
    NoCurrentResult,

    /// Submitted query text was blank
    #[error("Query text is empty")]
    EmptyQuery,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CadError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Creates an InvalidGeometryPayload error
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometryPayload(message.into())
    }

    /// Creates a Render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error belongs to the rendering layer.
    ///
    /// Rendering errors stop at the scene builder boundary and never reach the
    /// session controller.
    pub fn is_render_layer(&self) -> bool {
        matches!(self, Self::InvalidGeometryPayload(_) | Self::Render(_))
    }

    /// Check if this error should be shown to the user as a session error.
    pub fn is_session_level(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::HistoricalResult(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message suitable for the session error banner.
    ///
    /// Historical errors are shown verbatim, like live fetch failures.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(message) | Self::HistoricalResult(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CadError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CadError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CadError>`.
pub type Result<T> = std::result::Result<T, CadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layer_classification() {
        assert!(CadError::invalid_geometry("null shapes").is_render_layer());
        assert!(CadError::render("webgl lost").is_render_layer());
        assert!(!CadError::fetch("timeout").is_render_layer());
        assert!(CadError::fetch("timeout").is_session_level());
        assert!(CadError::HistoricalResult("boom".into()).is_session_level());
    }

    #[test]
    fn test_user_message_is_verbatim_for_session_errors() {
        assert_eq!(CadError::fetch("backend down").user_message(), "backend down");
        assert_eq!(
            CadError::HistoricalResult("Code file not found".into()).user_message(),
            "Code file not found"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: CadError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CadError::Serialization { ref format, .. } if format == "JSON"));
    }
}

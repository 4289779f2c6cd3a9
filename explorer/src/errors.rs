//! Error types for the profile pipeline.
//!
//! [`PipelineError`] is the closed set of expected failures a run can end
//! with. Everything that goes wrong outside a run (bad configuration, an
//! HTTP client that cannot be built) is a [`ConfigError`].

use crate::core::PipelineStage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The failure a pipeline run stopped on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The remote service reported the user as absent (HTTP 404).
    #[error("User not found: {identifier}")]
    UserNotFound {
        /// The identifier that was requested.
        identifier: String,
    },

    /// The remote service could not be reached.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Transport diagnostic.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("User data JSON parse failed: {message}")]
    UserDataJsonParseFailed {
        /// Parser diagnostic.
        message: String,
    },

    /// The record store rejected the write.
    #[error("User info save failed: {message}")]
    UserInfoSaveFailed {
        /// Store diagnostic.
        message: String,
    },
}

impl PipelineError {
    /// Creates a user not found error.
    #[must_use]
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::UserNotFound {
            identifier: identifier.into(),
        }
    }

    /// Creates a connection failed error.
    #[must_use]
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Creates a parse failed error.
    #[must_use]
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::UserDataJsonParseFailed {
            message: message.into(),
        }
    }

    /// Creates a save failed error.
    #[must_use]
    pub fn save_failed(message: impl Into<String>) -> Self {
        Self::UserInfoSaveFailed {
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound { .. } => ErrorKind::UserNotFound,
            Self::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            Self::UserDataJsonParseFailed { .. } => ErrorKind::UserDataJsonParseFailed,
            Self::UserInfoSaveFailed { .. } => ErrorKind::UserInfoSaveFailed,
        }
    }

    /// Returns the stage that raises this error.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        match self {
            Self::UserNotFound { .. } | Self::ConnectionFailed { .. } => PipelineStage::Fetch,
            Self::UserDataJsonParseFailed { .. } => PipelineStage::Decode,
            Self::UserInfoSaveFailed { .. } => PipelineStage::Persist,
        }
    }

    /// Returns the diagnostic carried by the error.
    #[must_use]
    pub fn diagnostic(&self) -> &str {
        match self {
            Self::UserNotFound { identifier } => identifier,
            Self::ConnectionFailed { message }
            | Self::UserDataJsonParseFailed { message }
            | Self::UserInfoSaveFailed { message } => message,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(self.kind().as_str()));
        map.insert("stage".to_string(), serde_json::json!(self.stage().as_str()));
        map.insert("diagnostic".to_string(), serde_json::json!(self.diagnostic()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Discriminant of [`PipelineError`], with a stable string code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`PipelineError::UserNotFound`].
    UserNotFound,
    /// See [`PipelineError::ConnectionFailed`].
    ConnectionFailed,
    /// See [`PipelineError::UserDataJsonParseFailed`].
    UserDataJsonParseFailed,
    /// See [`PipelineError::UserInfoSaveFailed`].
    UserInfoSaveFailed,
}

impl ErrorKind {
    /// Returns the stable code for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserNotFound => "user_not_found",
            Self::ConnectionFailed => "connection_failed",
            Self::UserDataJsonParseFailed => "user_data_json_parse_failed",
            Self::UserInfoSaveFailed => "user_info_save_failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while setting the pipeline up.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value is not usable.
    #[error("Invalid configuration: {field} - {reason}")]
    Invalid {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The configuration document is not valid JSON for the schema.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("Configuration IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The logging subscriber could not be installed.
    #[error("Logging setup error: {0}")]
    Logging(String),
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_and_stages() {
        let cases = [
            (
                PipelineError::user_not_found("ghost"),
                ErrorKind::UserNotFound,
                PipelineStage::Fetch,
            ),
            (
                PipelineError::connection_failed("refused"),
                ErrorKind::ConnectionFailed,
                PipelineStage::Fetch,
            ),
            (
                PipelineError::parse_failed("missing field"),
                ErrorKind::UserDataJsonParseFailed,
                PipelineStage::Decode,
            ),
            (
                PipelineError::save_failed("disk full"),
                ErrorKind::UserInfoSaveFailed,
                PipelineStage::Persist,
            ),
        ];

        for (err, kind, stage) in cases {
            assert_eq!(err.kind(), kind);
            assert_eq!(err.stage(), stage);
        }
    }

    #[test]
    fn test_display_carries_diagnostic() {
        let err = PipelineError::user_not_found("ghost");
        assert_eq!(err.to_string(), "User not found: ghost");
        assert_eq!(err.diagnostic(), "ghost");

        let err = PipelineError::connection_failed("dns error");
        assert!(err.to_string().contains("dns error"));
    }

    #[test]
    fn test_pipeline_error_to_dict() {
        let err = PipelineError::save_failed("Saving the user record failed");
        let dict = err.to_dict();

        assert_eq!(dict.get("type").unwrap(), "user_info_save_failed");
        assert_eq!(dict.get("stage").unwrap(), "persist");
        assert_eq!(dict.get("diagnostic").unwrap(), "Saving the user record failed");
    }

    #[test]
    fn test_error_kind_serialize() {
        let json = serde_json::to_string(&ErrorKind::UserDataJsonParseFailed).unwrap();
        assert_eq!(json, r#""user_data_json_parse_failed""#);
        assert_eq!(ErrorKind::ConnectionFailed.to_string(), "connection_failed");
    }

    #[test]
    fn test_config_error_invalid() {
        let err = ConfigError::invalid("fetch.base_url", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: fetch.base_url - must not be empty"
        );
    }
}

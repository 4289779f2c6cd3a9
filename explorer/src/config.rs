//! Configuration for the profile pipeline.
//!
//! Every value has a serde default, so a configuration document only needs
//! to name what it overrides. The decoder's date format lives here and is
//! handed to the decoder explicitly; nothing is registered globally.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// HTTP fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Decoder settings.
    #[serde(default)]
    pub decode: DecoderConfig,
    /// Annotator settings.
    #[serde(default)]
    pub annotate: AnnotatorConfig,
    /// Identifier used when none is given on the command line.
    #[serde(default = "default_identifier")]
    pub default_identifier: String,
}

fn default_identifier() -> String {
    "adomokos1".to_string()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            decode: DecoderConfig::default(),
            annotate: AnnotatorConfig::default(),
            default_identifier: default_identifier(),
        }
    }
}

impl ExplorerConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the fetch configuration.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Sets the decoder configuration.
    #[must_use]
    pub fn with_decode(mut self, decode: DecoderConfig) -> Self {
        self.decode = decode;
        self
    }

    /// Sets the annotator configuration.
    #[must_use]
    pub fn with_annotate(mut self, annotate: AnnotatorConfig) -> Self {
        self.annotate = annotate;
        self
    }

    /// Sets the default identifier.
    #[must_use]
    pub fn with_default_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.default_identifier = identifier.into();
        self
    }

    /// Checks that the values can drive a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("fetch.base_url", "must not be empty"));
        }
        if let Some(seconds) = self.fetch.timeout_seconds {
            if !seconds.is_finite() || seconds <= 0.0 {
                return Err(ConfigError::invalid(
                    "fetch.timeout_seconds",
                    "must be a positive number of seconds",
                ));
            }
            if Duration::try_from_secs_f64(seconds).is_err() {
                return Err(ConfigError::invalid(
                    "fetch.timeout_seconds",
                    "is too large to represent as a duration",
                ));
            }
        }
        if self.decode.date_format.is_empty() {
            return Err(ConfigError::invalid("decode.date_format", "must not be empty"));
        }
        Ok(())
    }
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Base URL; profiles are requested from `<base_url>/users/<identifier>`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds. `None` leaves the HTTP stack default.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("explorer/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Gets the timeout as a Duration, if one is configured and representable.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
    }

    /// Builds the profile URL for an identifier.
    #[must_use]
    pub fn profile_url(&self, identifier: &str) -> String {
        format!("{}/users/{}", self.base_url.trim_end_matches('/'), identifier)
    }
}

/// Configuration for the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// `chrono` format string for `created_at`.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "%Y-%m-%dT%H:%M:%SZ".to_string()
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl DecoderConfig {
    /// Creates a decoder configuration with the default date format.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date format.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

/// Configuration for the annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Counts strictly above this value are annotated.
    #[serde(default = "default_threshold")]
    pub threshold: i64,
    /// Suffix appended to the username.
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_threshold() -> i64 {
    20
}

fn default_marker() -> String {
    " ★".to_string()
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            marker: default_marker(),
        }
    }
}

impl AnnotatorConfig {
    /// Creates an annotator configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the marker.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

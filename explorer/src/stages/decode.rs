//! Decode stage: response body to [`ProfileRecord`].

use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::config::DecoderConfig;
use crate::core::{ProfileRecord, RawBody};
use crate::errors::PipelineError;

/// Wire shape of a profile document. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ProfilePayload {
    login: String,
    public_repos: i64,
    id: i64,
    #[serde(default)]
    created_at: Option<String>,
}

/// Decodes a profile body using `config` for the date format.
///
/// Pure: the same body and configuration always give the same result.
/// A `created_at` that is present but does not match the format fails the
/// whole decode; there is no partially filled record.
pub fn decode(raw: &RawBody, config: &DecoderConfig) -> Result<ProfileRecord, PipelineError> {
    let payload: ProfilePayload = serde_json::from_str(raw.as_str())
        .map_err(|e| PipelineError::parse_failed(e.to_string()))?;

    let created_at = payload
        .created_at
        .map(|text| {
            parse_created_at(&text, &config.date_format).map_err(|reason| {
                PipelineError::parse_failed(format!("invalid created_at '{text}': {reason}"))
            })
        })
        .transpose()?;

    Ok(ProfileRecord::new(
        payload.login,
        payload.public_repos,
        payload.id,
        created_at,
    ))
}

/// Parses `text` with `format`, accepting only the exact rendering of the
/// parsed value. Single-digit fields, signed years and leap seconds fail.
fn parse_created_at(text: &str, format: &str) -> Result<NaiveDateTime, String> {
    let parsed = NaiveDateTime::parse_from_str(text, format).map_err(|e| e.to_string())?;
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err("leap seconds are not accepted".to_string());
    }
    if parsed.format(format).to_string() != text {
        return Err(format!("does not match the format '{format}' exactly"));
    }
    Ok(parsed)
}

/// Decoder bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Creates a decoder.
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes a profile body.
    pub fn decode(&self, raw: &RawBody) -> Result<ProfileRecord, PipelineError> {
        decode(raw, &self.config)
    }
}

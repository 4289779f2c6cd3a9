//! Pipeline stage names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four steps of a profile pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Issues the HTTP request for the profile.
    Fetch,
    /// Parses the response body into a record.
    Decode,
    /// Applies the star annotation.
    Annotate,
    /// Hands the record to the store.
    Persist,
}

impl PipelineStage {
    /// All stages in the order a run visits them.
    pub const ALL: [Self; 4] = [Self::Fetch, Self::Decode, Self::Annotate, Self::Persist];

    /// Returns the stage name used in logs and events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Annotate => "annotate",
            Self::Persist => "persist",
        }
    }

    /// Returns true if the stage can fail.
    #[must_use]
    pub const fn is_fallible(&self) -> bool {
        !matches!(self, Self::Annotate)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::Fetch.to_string(), "fetch");
        assert_eq!(PipelineStage::Decode.to_string(), "decode");
        assert_eq!(PipelineStage::Annotate.to_string(), "annotate");
        assert_eq!(PipelineStage::Persist.to_string(), "persist");
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(
            PipelineStage::ALL,
            [
                PipelineStage::Fetch,
                PipelineStage::Decode,
                PipelineStage::Annotate,
                PipelineStage::Persist
            ]
        );
    }

    #[test]
    fn test_only_annotate_is_total() {
        let total: Vec<_> = PipelineStage::ALL
            .iter()
            .filter(|s| !s.is_fallible())
            .collect();
        assert_eq!(total, vec![&PipelineStage::Annotate]);
    }

    #[test]
    fn test_stage_serialize() {
        let json = serde_json::to_string(&PipelineStage::Persist).unwrap();
        assert_eq!(json, r#""persist""#);
    }
}

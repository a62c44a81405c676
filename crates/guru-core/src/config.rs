//! Runtime configuration for the diagnostic core.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tunable knobs for the mentor loop and the retrieval pipeline.
///
/// Loaded once by the composition root and shared read-only. The
/// confidence formula constants are not configurable; they live in
/// the thinker agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuruConfig {
    /// Whether the discoverer may consult the web search backend.
    #[serde(default)]
    pub enable_web_search: bool,

    /// Maximum number of similar past problems seeded into a session
    /// at the observe stage.
    #[serde(default = "default_past_problem_limit")]
    pub past_problem_limit: usize,

    /// Number of answered diagnostic questions required before the
    /// loop advances to problem framing.
    #[serde(default = "default_answers_before_frame")]
    pub answers_before_frame: usize,
}

fn default_past_problem_limit() -> usize {
    5
}

fn default_answers_before_frame() -> usize {
    3
}

impl Default for GuruConfig {
    fn default() -> Self {
        Self {
            enable_web_search: false,
            past_problem_limit: default_past_problem_limit(),
            answers_before_frame: default_answers_before_frame(),
        }
    }
}

impl GuruConfig {
    /// Parses a configuration from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuruConfig::default();
        assert!(!config.enable_web_search);
        assert_eq!(config.past_problem_limit, 5);
        assert_eq!(config.answers_before_frame, 3);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = GuruConfig::from_toml_str("enable_web_search = true").unwrap();
        assert!(config.enable_web_search);
        assert_eq!(config.past_problem_limit, 5);
        assert_eq!(config.answers_before_frame, 3);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(GuruConfig::from_toml_str("past_problem_limit = \"many\"").is_err());
    }
}

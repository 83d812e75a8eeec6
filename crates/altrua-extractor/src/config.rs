//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Document characters sent to the LLM by default
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 6000;

/// Organization label used when none is given
pub const DEFAULT_ORGANIZATION: &str = "Demo Corp";

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum time to wait for the LLM reply (seconds)
    pub llm_timeout_secs: u64,

    /// Leading document characters included in the prompt
    pub max_prompt_chars: usize,

    /// Label placed on summaries when the document does not name one
    pub organization: String,
}

impl ExtractorConfig {
    /// Get the LLM timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.llm_timeout_secs == 0 {
            return Err("llm_timeout_secs must be greater than 0".to_string());
        }
        if self.max_prompt_chars == 0 {
            return Err("max_prompt_chars must be greater than 0".to_string());
        }
        if self.organization.trim().is_empty() {
            return Err("organization must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            llm_timeout_secs: 120,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            organization: DEFAULT_ORGANIZATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_prompt_chars, 6000);
        assert_eq!(config.llm_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = ExtractorConfig::default();
        config.llm_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_prompt_window() {
        let mut config = ExtractorConfig::default();
        config.max_prompt_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_organization() {
        let mut config = ExtractorConfig::default();
        config.organization = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("organization = \"Acme\"").unwrap();
        assert_eq!(config.organization, "Acme");
        assert_eq!(config.llm_timeout_secs, 120);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig {
            llm_timeout_secs: 30,
            max_prompt_chars: 1000,
            organization: "Acme".to_string(),
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }
}

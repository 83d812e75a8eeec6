//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use altrua_extractor::ExtractorConfig;
use altrua_llm::anthropic::{
    DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the Anthropic API key by default
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// CLI configuration.
///
/// Secrets are never stored here; `llm.api_key_env` names the environment
/// variable the key is read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default summary transport
    #[serde(default)]
    pub transport: Transport,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Remote pipeline settings
    #[serde(default)]
    pub webhook: WebhookSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Where documents are summarized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Local pipeline against the LLM provider
    #[default]
    Local,
    /// Remote pipeline behind a webhook
    Webhook,
}

/// LLM provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API base URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Output token budget
    pub max_tokens: u32,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Attempts per prompt
    pub max_retries: u32,

    /// Timeout for one HTTP request (seconds)
    pub request_timeout_secs: u64,
}

/// Remote pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Webhook URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Timeout for one upload (seconds)
    pub timeout_secs: u64,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".altrua").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check values that cannot be enforced by types.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;

        if self.llm.model.trim().is_empty() {
            return Err(CliError::Config("llm.model must not be empty".into()));
        }
        if self.llm.max_tokens == 0 {
            return Err(CliError::Config("llm.max_tokens must be greater than 0".into()));
        }
        if self.webhook.timeout_secs == 0 {
            return Err(CliError::Config("webhook.timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: altrua_webhook::DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_true() -> bool {
    true
}

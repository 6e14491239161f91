use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fmt;
use std::path::Path;

use crate::prompts::PromptTemplate;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings. Secrets never live in the
/// configuration file; they are read from the environment.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Generation endpoint settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Retry policy for generation calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the remote text-generation endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationConfig {
    /// AWS region hosting the model
    #[serde(default = "default_region")]
    pub region: String,

    /// Model identifier
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Maximum number of tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top probability mass to consider (nucleus sampling)
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Sequences that end generation
    #[serde(default = "default_stop_sequences")]
    pub stop_sequences: Vec<String>,

    /// Timeout of a single call in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Prompt template override
    /// Placeholders: {language}, {topic}, {audience}, {tone}, {length}, {use_case}
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            model_id: default_model_id(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            stop_sequences: default_stop_sequences(),
            timeout_secs: default_timeout_secs(),
            prompt_template: None,
        }
    }
}

impl GenerationConfig {
    /// Template used to build prompts
    pub fn template(&self) -> PromptTemplate {
        match &self.prompt_template {
            Some(template) => PromptTemplate::new(template),
            None => PromptTemplate::script_writer(),
        }
    }
}

/// Retry settings for failed generation attempts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Shortest wait between attempts in seconds
    #[serde(default = "default_min_wait_secs")]
    pub min_wait_secs: u64,

    /// Longest wait between attempts in seconds
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,

    /// Base of the exponential wait in seconds, doubled after each failure
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_wait_secs: default_min_wait_secs(),
            max_wait_secs: default_max_wait_secs(),
            multiplier: default_multiplier(),
        }
    }
}

/// AWS credentials for the generation endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    /// Access key identifier
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Session token for temporary credentials
    pub session_token: Option<String>,
}

// Keep the secret out of logs
impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AwsCredentials {
    /// Create credentials from explicit values
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    /// Read credentials from the process environment
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through a variable lookup
    ///
    /// Returns `None` when the access key id or the secret key is missing or
    /// blank. A blank session token counts as absent.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_key_id = non_blank("AWS_ACCESS_KEY_ID")?;
        let secret_access_key = non_blank("AWS_SECRET_ACCESS_KEY")?;
        let session_token = non_blank("AWS_SESSION_TOKEN");

        Some(Self::new(access_key_id, secret_access_key, session_token))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Longest wait between attempts a configuration may ask for
pub const MAX_RETRY_WAIT_SECS: u64 = 3600;

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_model_id() -> String {
    "anthropic.claude-v2".to_string()
}

fn default_max_output_tokens() -> u32 {
    3000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_stop_sequences() -> Vec<String> {
    vec!["\n\n".to_string()]
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    6
}

fn default_min_wait_secs() -> u64 {
    1
}

fn default_max_wait_secs() -> u64 {
    60
}

fn default_multiplier() -> f64 {
    1.0 // 1 second base wait, doubled on each retry
}

impl Config {
    /// Load a configuration file, writing the defaults first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Load a configuration file, using the defaults without writing anything
    /// if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("Config file not found at '{}', using defaults.", path.display());
            Ok(Config::default())
        }
    }

    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Apply region and model overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply region and model overrides through a variable lookup
    ///
    /// `AWS_REGION` wins over `AWS_DEFAULT_REGION`; `BEDROCK_MODEL_ID` sets
    /// the model. Blank values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = non_blank("AWS_REGION").or_else(|| non_blank("AWS_DEFAULT_REGION")) {
            self.generation.region = region.trim().to_string();
        }
        if let Some(model_id) = non_blank("BEDROCK_MODEL_ID") {
            self.generation.model_id = model_id.trim().to_string();
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;
        if generation.region.trim().is_empty() {
            return Err(anyhow!("Generation region must not be empty"));
        }
        if generation.model_id.trim().is_empty() {
            return Err(anyhow!("Generation model_id must not be empty"));
        }
        if generation.max_output_tokens == 0 {
            return Err(anyhow!("max_output_tokens must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&generation.temperature) {
            return Err(anyhow!("temperature must be between 0.0 and 1.0, got {}", generation.temperature));
        }
        if !(0.0..=1.0).contains(&generation.top_p) {
            return Err(anyhow!("top_p must be between 0.0 and 1.0, got {}", generation.top_p));
        }
        if generation.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than 0"));
        }
        if let Some(template) = &generation.prompt_template {
            if !PromptTemplate::new(template).has_placeholder("topic") {
                return Err(anyhow!("prompt_template must contain the {{topic}} placeholder"));
            }
        }

        let retry = &self.retry;
        if retry.max_attempts == 0 {
            return Err(anyhow!("retry.max_attempts must be at least 1"));
        }
        if retry.min_wait_secs > retry.max_wait_secs {
            return Err(anyhow!(
                "retry.min_wait_secs ({}) must not exceed retry.max_wait_secs ({})",
                retry.min_wait_secs,
                retry.max_wait_secs
            ));
        }
        if retry.max_wait_secs > MAX_RETRY_WAIT_SECS {
            return Err(anyhow!(
                "retry.max_wait_secs must not exceed {}, got {}",
                MAX_RETRY_WAIT_SECS,
                retry.max_wait_secs
            ));
        }
        if !(retry.multiplier.is_finite() && retry.multiplier > 0.0) {
            return Err(anyhow!("retry.multiplier must be a positive number"));
        }
        if retry.multiplier > MAX_RETRY_WAIT_SECS as f64 {
            return Err(anyhow!(
                "retry.multiplier must not exceed {}, got {}",
                MAX_RETRY_WAIT_SECS,
                retry.multiplier
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            generation: GenerationConfig::default(),
            retry: RetryConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

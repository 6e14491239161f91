/*!
 * Generation client: sends a prompt to the model and returns the script.
 *
 * One `generate` call is one logical request. Each attempt builds the JSON
 * payload, invokes the provider and reads `generated_text` from the body;
 * any failure along that path, including an empty text, is retried by the
 * retry policy. Missing credentials fail before the first attempt.
 */

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::app_config::{AwsCredentials, Config, GenerationConfig};
use crate::errors::{ConfigError, GenerationError, ProviderError};
use crate::providers::{InvokeTarget, Provider};
use crate::retry::RetryPolicy;

/// Request body sent to the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationPayload {
    /// The prompt text
    pub prompt: String,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
    /// Sequences that end generation
    pub stop_sequences: Vec<String>,
}

impl GenerationPayload {
    /// Payload for a prompt with the configured sampling settings
    pub fn new(prompt: &str, config: &GenerationConfig) -> Self {
        Self {
            prompt: prompt.to_string(),
            max_tokens: config.max_output_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            stop_sequences: config.stop_sequences.clone(),
        }
    }
}

/// Response body returned by the model
#[derive(Debug, Deserialize)]
struct GenerationBody {
    /// Generated text; text-completion models name it `completion`
    #[serde(default, alias = "completion")]
    generated_text: Option<String>,
}

/// Read the generated text from a response body
///
/// The text is trimmed; a missing or blank text is an `EmptyResponse`.
pub fn extract_generated_text(body: &[u8]) -> Result<String, ProviderError> {
    let parsed: GenerationBody = serde_json::from_slice(body).map_err(|e| {
        let preview: String = String::from_utf8_lossy(body).chars().take(200).collect();
        ProviderError::ParseError(format!("{} (body starts with: {})", e, preview))
    })?;

    let text = parsed.generated_text.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Client for generating text through a provider with retries
#[derive(Debug)]
pub struct GenerationClient<P: Provider> {
    config: GenerationConfig,
    credentials: Option<AwsCredentials>,
    retry: RetryPolicy,
    provider: P,
}

impl<P: Provider> GenerationClient<P> {
    /// Create a client from an explicit configuration and credentials
    pub fn new(config: &Config, credentials: Option<AwsCredentials>, provider: P) -> Self {
        Self {
            config: config.generation.clone(),
            credentials,
            retry: RetryPolicy::from_config(&config.retry),
            provider,
        }
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The retry policy in use
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The provider in use
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generation settings in use
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate text for a prompt
    ///
    /// Returns the generated text of the first successful attempt, a
    /// configuration error without any attempt when credentials are missing,
    /// or the last attempt's error once the retry policy gives up.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let credentials = self
            .credentials
            .clone()
            .ok_or(ConfigError::MissingCredentials)?;

        let target = InvokeTarget {
            region: self.config.region.clone(),
            model_id: self.config.model_id.clone(),
            credentials,
        };
        let target = &target;

        info!(
            "Generating with {} model {} in {}",
            self.provider.name(),
            target.model_id,
            target.region
        );

        self.retry
            .run(|attempt| self.attempt(target, prompt, attempt))
            .await
            .map_err(|e| {
                error!("Generation failed after {} attempt(s): {}", e.attempts, e.last_error);
                GenerationError::Exhausted {
                    attempts: e.attempts,
                    last_error: e.last_error,
                }
            })
    }

    async fn attempt(&self, target: &InvokeTarget, prompt: &str, attempt: u32) -> Result<String, ProviderError> {
        let payload = GenerationPayload::new(prompt, &self.config);
        let body = serde_json::to_vec(&payload)
            .map_err(|e| ProviderError::ParseError(format!("Failed to serialize payload: {}", e)))?;

        debug!(
            "Attempt {}/{}: sending {} byte payload",
            attempt,
            self.retry.max_attempts(),
            body.len()
        );

        let response = self.provider.invoke(target, body).await?;
        extract_generated_text(&response)
    }
}

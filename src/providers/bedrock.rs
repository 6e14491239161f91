use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig as SdkRetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use log::debug;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::app_config::AwsCredentials;
use crate::errors::ProviderError;
use crate::providers::{InvokeTarget, Provider};

/// Amazon Bedrock Runtime provider
///
/// Builds an SDK client from the target's static credentials on first use and
/// reuses it while the region and credentials stay the same. SDK-level
/// retries are disabled; attempts are governed by the caller's retry policy.
#[derive(Debug, Clone)]
pub struct Bedrock {
    /// Timeout of one invocation
    timeout: Duration,
    /// Client for the last target, shared between clones
    cached: Arc<Mutex<Option<CachedClient>>>,
}

#[derive(Debug)]
struct CachedClient {
    region: String,
    credentials: AwsCredentials,
    client: Client,
    created_at: Instant,
}

impl CachedClient {
    fn serves(&self, target: &InvokeTarget) -> bool {
        self.region == target.region && self.credentials == target.credentials
    }
}

impl Default for Bedrock {
    fn default() -> Self {
        Self::new(Duration::from_secs(120))
    }
}

impl Bedrock {
    /// Create a new Bedrock provider
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Timeout applied to each invocation
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn client(&self, target: &InvokeTarget) -> Client {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref().filter(|entry| entry.serves(target)) {
            debug!("Reusing Bedrock client created {:?} ago", entry.created_at.elapsed());
            return entry.client.clone();
        }

        debug!("Creating Bedrock runtime client for {}", target.region);
        let client = self.build_client(target).await;
        *cached = Some(CachedClient {
            region: target.region.clone(),
            credentials: target.credentials.clone(),
            client: client.clone(),
            created_at: Instant::now(),
        });
        client
    }

    async fn build_client(&self, target: &InvokeTarget) -> Client {
        let credentials = aws_credential_types::Credentials::new(
            &target.credentials.access_key_id,
            &target.credentials.secret_access_key,
            target.credentials.session_token.clone(),
            None,
            "ytscript",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(target.region.clone()))
            .credentials_provider(credentials)
            .retry_config(SdkRetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(self.timeout)
                    .build(),
            )
            .load()
            .await;

        Client::new(&sdk_config)
    }
}

#[async_trait]
impl Provider for Bedrock {
    async fn invoke(&self, target: &InvokeTarget, payload: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        debug!(
            "Invoking Bedrock model {} in {} ({} byte payload)",
            target.model_id,
            target.region,
            payload.len()
        );

        let client = self.client(target).await;
        let output = client
            .invoke_model()
            .model_id(&target.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(output.body.into_inner())
    }

    fn name(&self) -> &'static str {
        "bedrock"
    }
}

/// Translate an SDK failure into the provider error taxonomy
fn map_sdk_error(err: SdkError<InvokeModelError>) -> ProviderError {
    let detail = DisplayErrorContext(&err).to_string();

    let mapped = match err {
        SdkError::DispatchFailure(_) => ProviderError::ConnectionError(detail),
        SdkError::TimeoutError(_) => ProviderError::ConnectionError(format!("request timed out: {}", detail)),
        SdkError::ResponseError(_) => ProviderError::ParseError(detail),
        SdkError::ServiceError(context) => {
            let status_code = context.raw().status().as_u16();
            match context.into_err() {
                InvokeModelError::ThrottlingException(e) => {
                    ProviderError::RateLimitExceeded(e.to_string())
                }
                InvokeModelError::ServiceQuotaExceededException(e) => {
                    ProviderError::RateLimitExceeded(e.to_string())
                }
                InvokeModelError::AccessDeniedException(e) => {
                    ProviderError::AuthenticationError(e.to_string())
                }
                other => ProviderError::ApiError {
                    status_code,
                    message: other.to_string(),
                },
            }
        }
        _ => ProviderError::RequestFailed(detail),
    };

    debug!("Bedrock invocation failed: {}", mapped);
    mapped
}

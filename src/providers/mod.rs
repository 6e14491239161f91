/*!
 * Provider implementations for the text-generation endpoint.
 *
 * This module contains client implementations behind one narrow capability,
 * `invoke(model_id, payload) -> body`:
 * - Bedrock: Amazon Bedrock Runtime `InvokeModel`
 * - Mock: scripted in-process provider for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::AwsCredentials;
use crate::errors::ProviderError;

/// Where an invocation goes and who it is made as
#[derive(Debug, Clone)]
pub struct InvokeTarget {
    /// Region hosting the model
    pub region: String,
    /// Model identifier
    pub model_id: String,
    /// Credentials for the call
    pub credentials: AwsCredentials,
}

/// Common trait for all generation providers
///
/// A provider sends an opaque JSON payload to a model and returns the raw
/// response body. Building the payload and reading the body are left to the
/// generation client, so providers stay interchangeable.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Invoke the model with a JSON payload
    ///
    /// # Arguments
    /// * `target` - Region, model and credentials for the call
    /// * `payload` - Serialized JSON request body
    ///
    /// # Returns
    /// * `Result<Vec<u8>, ProviderError>` - The response body or an error
    async fn invoke(&self, target: &InvokeTarget, payload: Vec<u8>) -> Result<Vec<u8>, ProviderError>;

    /// Short name used in log messages
    fn name(&self) -> &'static str;
}

pub mod bedrock;
pub mod mock;

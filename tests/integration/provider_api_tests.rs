/*!
 * Integration tests against the live Amazon Bedrock endpoint
 *
 * These are ignored by default. Run them with `cargo test -- --ignored` after
 * exporting AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY for an account with
 * access to the configured model.
 */

use anyhow::Result;
use std::time::Duration;
use ytscript::app_config::{AwsCredentials, Config};
use ytscript::errors::{GenerationError, ProviderError};
use ytscript::generation::GenerationClient;
use ytscript::providers::bedrock::Bedrock;
use ytscript::providers::{InvokeTarget, Provider};
use ytscript::RetryPolicy;
use crate::common;

#[test]
fn test_bedrock_default_shouldUseTwoMinuteTimeout() {
    let provider = Bedrock::default();
    assert_eq!(provider.timeout(), Duration::from_secs(120));
    assert_eq!(provider.name(), "bedrock");
}

/// Generate a short script with the real model
#[tokio::test]
#[ignore]
async fn test_bedrock_generate_withEnvCredentials_shouldReturnScript() -> Result<()> {
    common::init_logging();
    let Some(credentials) = AwsCredentials::from_env() else {
        eprintln!("AWS credentials not set, skipping");
        return Ok(());
    };

    let mut config = Config::default();
    config.apply_env_overrides();
    let client = GenerationClient::new(&config, Some(credentials), Bedrock::default());

    let script = client
        .generate("\n\nHuman: Write a two-line YouTube intro about budget laptops.\n\nAssistant:")
        .await?;
    assert!(!script.trim().is_empty());
    Ok(())
}

/// Rejected credentials fail every attempt with a provider error
#[tokio::test]
#[ignore]
async fn test_bedrock_invoke_withBogusCredentials_shouldFail() -> Result<()> {
    common::init_logging();
    let target = InvokeTarget {
        region: "us-east-1".to_string(),
        model_id: "anthropic.claude-v2".to_string(),
        credentials: AwsCredentials::new("AKIDEXAMPLE", "not-a-real-secret", None),
    };

    let result = Bedrock::new(Duration::from_secs(30)).invoke(&target, b"{}".to_vec()).await;
    assert!(result.is_err());

    let client = GenerationClient::new(&Config::default(), Some(common::test_credentials()), Bedrock::default())
        .with_retry_policy(RetryPolicy::new(2, Duration::from_secs(1), Duration::from_secs(2)));
    match client.generate("hello").await {
        Err(GenerationError::Exhausted { attempts, last_error }) => {
            assert_eq!(attempts, 2);
            assert!(!matches!(last_error, ProviderError::EmptyResponse));
        }
        other => panic!("expected exhausted retries, got {:?}", other),
    }
    Ok(())
}

/*!
 * Tests for the generation client and its retry behavior
 */

use std::time::Duration;

use ytscript::errors::{ConfigError, GenerationError, ProviderError};
use ytscript::generation::{GenerationClient, GenerationPayload};
use ytscript::providers::mock::MockProvider;
use ytscript::{Jitter, RetryPolicy};
use crate::common;

fn client(provider: MockProvider) -> GenerationClient<MockProvider> {
    GenerationClient::new(&common::test_config(), Some(common::test_credentials()), provider)
}

#[tokio::test(start_paused = true)]
async fn test_generate_withWorkingProvider_shouldReturnTextAfterOneCall() {
    let provider = MockProvider::working("  # Intro\nHey everyone!  ");
    let client = client(provider.clone());

    let script = client.generate("Write a script").await.unwrap();

    assert_eq!(script, "# Intro\nHey everyone!");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_generate_withAlwaysFailingProvider_shouldMakeExactlySixAttempts() {
    common::init_logging();
    let provider = MockProvider::failing();
    let client = client(provider.clone());

    let error = client.generate("Write a script").await.unwrap_err();

    assert_eq!(provider.call_count(), 6);
    match error {
        GenerationError::Exhausted { attempts, last_error } => {
            assert_eq!(attempts, 6);
            assert!(matches!(last_error, ProviderError::ApiError { status_code: 500, .. }));
            assert!(last_error.to_string().contains("request #6"));
        }
        other => panic!("expected Exhausted, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_generate_withSuccessOnKthAttempt_shouldMakeKCalls() {
    for k in 1..=6 {
        let provider = MockProvider::succeed_on(k, format!("script {}", k));
        let client = client(provider.clone());

        let script = client.generate("prompt").await.unwrap();

        assert_eq!(script, format!("script {}", k));
        assert_eq!(provider.call_count(), k);
    }
}

#[tokio::test(start_paused = true)]
async fn test_generate_withEmptyOutput_shouldRetryAndFailWithEmptyResponse() {
    let provider = MockProvider::empty();
    let client = client(provider.clone());

    let error = client.generate("prompt").await.unwrap_err();

    assert_eq!(provider.call_count(), 6);
    assert!(matches!(
        error,
        GenerationError::Exhausted { attempts: 6, last_error: ProviderError::EmptyResponse }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_generate_withMalformedBody_shouldRetryAndFailWithParseError() {
    let provider = MockProvider::malformed();
    let client = client(provider.clone());

    let error = client.generate("prompt").await.unwrap_err();

    assert_eq!(provider.call_count(), 6);
    assert!(matches!(
        error,
        GenerationError::Exhausted { last_error: ProviderError::ParseError(_), .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_generate_withoutCredentials_shouldFailBeforeAnyAttempt() {
    let provider = MockProvider::working("never returned");
    let client = GenerationClient::new(&common::test_config(), None, provider.clone());

    let error = client.generate("prompt").await.unwrap_err();

    assert!(matches!(error, GenerationError::Configuration(ConfigError::MissingCredentials)));
    assert_eq!(error.attempts(), 0);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_generate_withFailures_shouldWaitBetweenOneAndSixtySeconds() {
    let provider = MockProvider::failing();
    let client = client(provider.clone());

    let _ = client.generate("prompt").await;

    let calls = provider.calls();
    assert_eq!(calls.len(), 6);
    for pair in calls.windows(2) {
        let gap = pair[1].at - pair[0].at;
        assert!(gap >= Duration::from_secs(1), "gap {:?} below one second", gap);
        assert!(gap <= Duration::from_secs(60), "gap {:?} above sixty seconds", gap);
    }
}

#[tokio::test(start_paused = true)]
async fn test_generate_withCustomPolicy_shouldUseItsAttemptCap() {
    let provider = MockProvider::failing();
    let policy = RetryPolicy::new(2, Duration::from_secs(1), Duration::from_secs(1)).with_jitter(Jitter::None);
    let client = client(provider.clone()).with_retry_policy(policy);

    let error = client.generate("prompt").await.unwrap_err();

    assert_eq!(error.attempts(), 2);
    assert_eq!(provider.call_count(), 2);
    let calls = provider.calls();
    assert_eq!(calls[1].at - calls[0].at, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_generate_shouldSendConfiguredPayloadToConfiguredModel() {
    let provider = MockProvider::working("ok");
    let mut config = common::test_config();
    config.generation.region = "eu-central-1".to_string();
    config.generation.model_id = "anthropic.claude-instant-v1".to_string();
    config.generation.max_output_tokens = 1200;
    let client = GenerationClient::new(&config, Some(common::test_credentials()), provider.clone());

    client.generate("Write about {topic}").await.unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].region, "eu-central-1");
    assert_eq!(calls[0].model_id, "anthropic.claude-instant-v1");

    let payload: GenerationPayload = serde_json::from_str(&calls[0].payload).unwrap();
    assert_eq!(payload.prompt, "Write about {topic}");
    assert_eq!(payload.max_tokens, 1200);
    assert_eq!(payload.temperature, 0.7);
    assert_eq!(payload.top_p, 0.9);
    assert_eq!(payload.stop_sequences, vec!["\n\n".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_generate_acrossRetries_shouldSendIdenticalPayloads() {
    let provider = MockProvider::succeed_on(3, "ok");
    let client = client(provider.clone());

    client.generate("same prompt").await.unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.payload == calls[0].payload));
}

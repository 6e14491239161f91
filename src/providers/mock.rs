/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different endpoint behaviors:
 * - `MockProvider::working(text)` - Always succeeds with the given text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Succeeds with an empty generated text
 * - `MockProvider::succeed_on(k, text)` - Fails until the k-th call
 *
 * Every call is recorded with its payload and the (Tokio) time it was made,
 * so tests can check attempt counts and the waits between attempts.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use crate::errors::ProviderError;
use crate::providers::{InvokeTarget, Provider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the given text
    Working(String),
    /// Always fails with an error
    Failing,
    /// Succeeds with an empty `generated_text`
    Empty,
    /// Returns a body that is not JSON
    Malformed,
    /// Fails until the given 1-based call, then succeeds with the text
    SucceedOn { call: usize, text: String },
}

/// A call received by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Model the call was made to
    pub model_id: String,
    /// Region the call was made to
    pub region: String,
    /// Payload as UTF-8 text
    pub payload: String,
    /// When the call arrived
    pub at: Instant,
}

/// Mock provider for testing generation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Calls received, shared between clones
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Working(text.into()))
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty generated text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that returns a body that is not JSON
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a mock that fails until the given call succeeds
    pub fn succeed_on(call: usize, text: impl Into<String>) -> Self {
        Self::new(MockBehavior::SucceedOn {
            call,
            text: text.into(),
        })
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Build a response body carrying the generated text
    pub fn response_body(text: &str) -> Vec<u8> {
        serde_json::json!({ "generated_text": text })
            .to_string()
            .into_bytes()
    }

    fn record(&self, target: &InvokeTarget, payload: &[u8]) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model_id: target.model_id.clone(),
                region: target.region.clone(),
                payload: String::from_utf8_lossy(payload).into_owned(),
                at: Instant::now(),
            });
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn invoke(&self, target: &InvokeTarget, payload: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.record(target, &payload);

        match &self.behavior {
            MockBehavior::Working(text) => Ok(Self::response_body(text)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: format!("Simulated provider failure (request #{})", call),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(Self::response_body("")),

            MockBehavior::Malformed => Ok(b"<html>Service Unavailable</html>".to_vec()),

            MockBehavior::SucceedOn { call: success_call, text } => {
                if call >= *success_call {
                    Ok(Self::response_body(text))
                } else {
                    Err(ProviderError::ConnectionError(format!(
                        "Simulated connection reset (request #{})",
                        call
                    )))
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate the response shapes the
 * interpreter has to cope with:
 * - `MockProvider::structured()` - returns a translate_text function call
 * - `MockProvider::embedded_json()` - free text with an embedded JSON block
 * - `MockProvider::plain_text()` - free text only
 * - `MockProvider::malformed_span()` - free text with an unparsable {...} span
 * - `MockProvider::failing()` - always fails with an error
 */

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{ModelProvider, ModelRequest, ModelResponse, StructuredCall, TokenUsage};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns a well-formed translate_text function call
    Structured,
    /// Returns free text with an embedded JSON payload
    EmbeddedJson,
    /// Returns only plain translated text
    PlainText,
    /// Returns free text containing a brace span that does not parse
    MalformedSpan,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing pipeline behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&ModelRequest) -> ModelResponse>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a mock that emits a structured function call
    pub fn structured() -> Self {
        Self::new(MockBehavior::Structured)
    }

    /// Create a mock that embeds a JSON payload in free text
    pub fn embedded_json() -> Self {
        Self::new(MockBehavior::EmbeddedJson)
    }

    /// Create a mock that returns plain text only
    pub fn plain_text() -> Self {
        Self::new(MockBehavior::PlainText)
    }

    /// Create a mock that returns an unparsable brace span
    pub fn malformed_span() -> Self {
        Self::new(MockBehavior::MalformedSpan)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&ModelRequest) -> ModelResponse) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// The canned structured-call payload the mock emits
    pub fn canned_call() -> StructuredCall {
        let args = json!({
            "text": "hello world",
            "sourceLang": "English",
            "targetLang": "French",
            "translatedText": "bonjour le monde",
            "confidence": 0.95,
            "culturalNotes": "Common greeting"
        });

        StructuredCall {
            name: "translate_text".to_string(),
            args: args.as_object().cloned().unwrap_or_default(),
        }
    }

    fn canned_usage() -> TokenUsage {
        TokenUsage {
            prompt_units: 42,
            completion_units: 17,
            total_units: 59,
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        if let Some(generator) = self.custom_response {
            return Ok(generator(&request));
        }

        match self.behavior {
            MockBehavior::Structured => Ok(ModelResponse {
                text: String::new(),
                structured_call: Some(Self::canned_call()),
                usage: Some(Self::canned_usage()),
            }),

            MockBehavior::EmbeddedJson => Ok(ModelResponse {
                text: concat!(
                    "Here is the translation you asked for:\n",
                    "{\"sourceLang\": \"English\", \"targetLang\": \"French\", ",
                    "\"translatedText\": \"bonjour le monde\", \"confidence\": 0.8}\n",
                    "Let me know if you need anything else."
                )
                .to_string(),
                structured_call: None,
                usage: Some(Self::canned_usage()),
            }),

            MockBehavior::PlainText => Ok(ModelResponse {
                text: "bonjour le monde".to_string(),
                structured_call: None,
                usage: Some(Self::canned_usage()),
            }),

            MockBehavior::MalformedSpan => Ok(ModelResponse {
                text: "Result: {translatedText: bonjour, oops not json}".to_string(),
                structured_call: None,
                usage: Some(Self::canned_usage()),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(ModelResponse {
                        text: "bonjour le monde".to_string(),
                        structured_call: None,
                        usage: None,
                    })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(ModelResponse {
                text: String::new(),
                structured_call: None,
                usage: None,
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(ModelResponse {
                    text: "bonjour le monde".to_string(),
                    structured_call: None,
                    usage: None,
                })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

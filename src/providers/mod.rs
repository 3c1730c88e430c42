/*!
 * Provider implementations for generative-language services.
 *
 * This module contains client implementations for the model providers:
 * - Gemini: Google Generative Language API (supports function declarations)
 * - Ollama: Local LLM server (free-text responses only)
 *
 * All providers speak one request/response shape so the pipeline never has
 * to know which transport produced an answer.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A structured-output function descriptor passed to the model boundary.
///
/// Providers that support function calling forward this as a tool
/// declaration; providers that do not simply ignore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSchema {
    /// Function name the model should call
    pub name: String,

    /// Human-readable description of the function
    pub description: String,

    /// JSON-schema object describing the function parameters
    pub parameters: serde_json::Value,
}

/// A structured function-call payload extracted from a model response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredCall {
    /// Name of the called function
    pub name: String,

    /// Arguments the model supplied for the call
    pub args: serde_json::Map<String, serde_json::Value>,
}

/// Token usage reported by a provider, in provider-defined units
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Units consumed by the prompt
    pub prompt_units: u64,

    /// Units consumed by the completion
    pub completion_units: u64,

    /// Total units consumed
    pub total_units: u64,
}

/// A rendered request to the model boundary
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// The rendered prompt text
    pub prompt: String,

    /// Sampling temperature, in [0, 1]
    pub temperature: f32,

    /// Maximum number of output tokens to generate
    pub max_output_tokens: u32,

    /// Optional structured-output schema the model should honor
    pub function_schema: Option<FunctionSchema>,
}

impl ModelRequest {
    /// Create a new request with default generation options
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.3,
            max_output_tokens: 1024,
            function_schema: None,
        }
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 1.0);
        self
    }

    /// Set the output token limit
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Attach a structured-output schema
    pub fn function_schema(mut self, schema: FunctionSchema) -> Self {
        self.function_schema = Some(schema);
        self
    }
}

/// A model response, normalized across providers
#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    /// Free-text portion of the response
    pub text: String,

    /// Structured function call, when the provider emitted one
    pub structured_call: Option<StructuredCall>,

    /// Token usage, when the provider reports it
    pub usage: Option<TokenUsage>,
}

/// Common trait for all model providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the pipeline.
#[async_trait]
pub trait ModelProvider: Send + Sync + Debug {
    /// Short provider name for logging
    fn name(&self) -> &'static str;

    /// Send a request to the provider and wait for the response
    ///
    /// # Arguments
    /// * `request` - The rendered request to complete
    ///
    /// # Returns
    /// * `Result<ModelResponse, ProviderError>` - The normalized response or an error
    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is usable, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod gemini;
pub mod ollama;
pub mod mock;

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use log::error;

use crate::errors::ProviderError;
use crate::providers::{ModelProvider, ModelRequest, ModelResponse, TokenUsage};

/// Ollama client for interacting with a local Ollama server
///
/// Ollama has no function-calling surface here, so responses never carry a
/// structured call and the interpreter's free-text tiers do the work.
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name to generate with
    model: String,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
    /// Number of prompt tokens
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Version response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct VersionResponse {
    /// Server version string
    pub version: String,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: None,
            stream: false,
        }
    }

    /// Set the generation options
    pub fn options(mut self, temperature: f32, num_predict: u32) -> Self {
        self.options = Some(GenerationOptions {
            temperature: Some(temperature),
            num_predict: Some(num_predict),
        });
        self
    }
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            model: model.into(),
        }
    }

    /// Send a generation request
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let api_url = format!("{}/api/generate", self.base_url);

        let response = self.client.post(&api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to Ollama: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response.json::<GenerationResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Ollama response: {}", e)))
    }

    /// Query the server version
    pub async fn version(&self) -> Result<String, ProviderError> {
        let api_url = format!("{}/api/version", self.base_url);

        let response = self.client.get(&api_url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to reach Ollama: {}", e)))?;

        let version = response.json::<VersionResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Ollama version response: {}", e)))?;

        Ok(version.version)
    }
}

#[async_trait]
impl ModelProvider for Ollama {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, ProviderError> {
        // The function schema is ignored: Ollama answers in free text and the
        // interpreter falls through to its text tiers.
        let generation = GenerationRequest::new(&self.model, request.prompt)
            .options(request.temperature, request.max_output_tokens);

        let response = self.generate(generation).await?;

        let usage = match (response.prompt_eval_count, response.eval_count) {
            (None, None) => None,
            (prompt, completion) => {
                let prompt_units = prompt.unwrap_or(0);
                let completion_units = completion.unwrap_or(0);
                Some(TokenUsage {
                    prompt_units,
                    completion_units,
                    total_units: prompt_units + completion_units,
                })
            }
        };

        Ok(ModelResponse {
            text: response.response,
            structured_call: None,
            usage,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.version().await?;
        Ok(())
    }
}

use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::{FunctionSchema, ModelProvider, ModelRequest, ModelResponse, StructuredCall, TokenUsage};

/// Gemini client for interacting with the Google Generative Language API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model identifier to generate with
    model: String,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Conversation contents
    contents: Vec<GeminiContent>,

    /// Generation options
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,

    /// Tool declarations the model may call
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

/// A single content block in a Gemini conversation
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Role of the content author (user, model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    pub parts: Vec<GeminiPart>,
}

/// One part of a content block: either text or a function call
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Plain text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Function call emitted by the model
    #[serde(rename = "functionCall", skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiFunctionCall>,
}

/// A function call emitted by the model
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    /// Name of the called function
    pub name: String,

    /// Arguments supplied for the call
    #[serde(default)]
    pub args: serde_json::Map<String, serde_json::Value>,
}

/// Generation options for a Gemini request
#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Tool wrapper carrying function declarations
#[derive(Debug, Serialize)]
pub struct GeminiTool {
    /// Declared functions the model may call
    #[serde(rename = "functionDeclarations")]
    function_declarations: Vec<FunctionSchema>,
}

/// Token usage metadata reported by the API
#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    /// Number of prompt tokens
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u64,

    /// Number of generated tokens
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u64,

    /// Total token count
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: u64,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Response candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Token usage metadata
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// A single response candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// Generated content
    pub content: Option<GeminiContent>,
}

impl GeminiRequest {
    /// Create a new request from a user prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.into()),
                    function_call: None,
                }],
            }],
            generation_config: None,
            tools: None,
        }
    }

    /// Set the generation options
    pub fn generation_config(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.generation_config = Some(GenerationConfig {
            temperature: Some(temperature),
            max_output_tokens: Some(max_output_tokens),
        });
        self
    }

    /// Declare a function the model may call
    pub fn function_declaration(mut self, schema: FunctionSchema) -> Self {
        self.tools = Some(vec![GeminiTool {
            function_declarations: vec![schema],
        }]);
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Complete a generateContent request
    pub async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };
        let api_url = format!("{}/v1beta/models/{}:generateContent", base, self.model);

        let response = self.client.post(&api_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to Gemini API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(error_text),
                429 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError { status_code: code, message: error_text },
            });
        }

        response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Gemini API response: {}", e)))
    }

    /// Extract the concatenated text parts from a response
    pub fn extract_text_from_response(response: &GeminiResponse) -> String {
        response.candidates.iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// Extract the first function call from a response, if any
    pub fn extract_function_call(response: &GeminiResponse) -> Option<StructuredCall> {
        response.candidates.iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .find_map(|p| p.function_call.as_ref())
            .map(|call| StructuredCall {
                name: call.name.clone(),
                args: call.args.clone(),
            })
    }
}

#[async_trait]
impl ModelProvider for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, ProviderError> {
        let mut gemini_request = GeminiRequest::new(request.prompt)
            .generation_config(request.temperature, request.max_output_tokens);

        if let Some(schema) = request.function_schema {
            gemini_request = gemini_request.function_declaration(schema);
        }

        let response = self.complete(gemini_request).await?;

        let usage = response.usage_metadata.as_ref().map(|u| TokenUsage {
            prompt_units: u.prompt_token_count,
            completion_units: u.candidates_token_count,
            total_units: u.total_token_count,
        });

        Ok(ModelResponse {
            text: Self::extract_text_from_response(&response),
            structured_call: Self::extract_function_call(&response),
            usage,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new("Hello").generation_config(0.0, 8);
        self.complete(request).await?;
        Ok(())
    }
}

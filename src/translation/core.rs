/*!
 * Core translation pipeline implementation.
 *
 * This module contains the TranslationPipeline struct, which owns the full
 * request resolution sequence: glossary retrieval first, then complexity
 * classification, prompt rendering, model invocation, response
 * interpretation, and output normalization. Within one resolution,
 * retrieval always completes before any model call is attempted.
 */

use anyhow::{Result, anyhow};
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, TranslationProvider as ConfigTranslationProvider};
use crate::language_utils;
use crate::providers::gemini::Gemini;
use crate::providers::ollama::Ollama;
use crate::providers::{ModelProvider, ModelRequest, TokenUsage};
use crate::translation::classifier::{ComplexityClassifier, HeuristicClassifier};
use crate::translation::glossary::GlossaryStore;
use crate::translation::interpreter::ResponseInterpreter;
use crate::translation::prompts::{translate_text_schema, PromptBuilder, PromptStrategy};
use crate::translation::request::TranslationRequest;
use crate::translation::resolver::RetrievalResolver;
use crate::translation::result::{normalize, ResultDraft, ResultStatus, TranslationResult};

/// Token usage statistics for tracking API consumption
#[derive(Clone)]
pub struct TokenUsageStats {
    /// Units consumed by prompts
    pub prompt_units: u64,

    /// Units consumed by completions
    pub completion_units: u64,

    /// Total units consumed
    pub total_units: u64,

    /// Number of model invocations
    pub request_count: u64,

    /// Start time of usage tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,
}

impl Default for TokenUsageStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenUsageStats {
    /// Create a new empty token usage stats instance
    pub fn new() -> Self {
        Self {
            prompt_units: 0,
            completion_units: 0,
            total_units: 0,
            request_count: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider: String::new(),
        }
    }

    /// Record one model invocation and its reported usage
    pub fn add_invocation(&mut self, usage: Option<TokenUsage>, duration: Duration) {
        self.request_count += 1;
        self.api_duration += duration;

        if let Some(usage) = usage {
            self.prompt_units += usage.prompt_units;
            self.completion_units += usage.completion_units;
            self.total_units += usage.total_units;
        }
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        let api_secs = self.api_duration.as_secs_f64();

        format!(
            "Token Usage Summary:\n\
             Provider: {}\n\
             Model invocations: {}\n\
             Prompt units: {}\n\
             Completion units: {}\n\
             Total units: {}\n\
             API request time: {:.2}s",
            self.provider,
            self.request_count,
            self.prompt_units,
            self.completion_units,
            self.total_units,
            api_secs
        )
    }
}

/// Main translation pipeline
///
/// Request-scoped and stateless between invocations except for the shared
/// glossary store. The pipeline never raises for non-empty input: every
/// outcome is a well-formed TranslationResult.
pub struct TranslationPipeline {
    /// Model provider implementation
    provider: Arc<dyn ModelProvider>,

    /// Shared glossary store
    glossary: GlossaryStore,

    /// Strategy selection implementation
    classifier: Box<dyn ComplexityClassifier>,

    /// Sampling temperature for model requests
    temperature: f32,

    /// Output token limit for model requests
    max_output_tokens: u32,

    /// Whether successful model translations are recorded into the glossary
    record_translations: bool,

    /// Explicit strategy override, bypassing the classifier
    strategy_override: Option<PromptStrategy>,

    /// Accumulated usage statistics
    usage: Mutex<TokenUsageStats>,
}

impl TranslationPipeline {
    /// Create a pipeline from the application configuration
    pub fn new(config: &Config) -> Result<Self> {
        let translation = &config.translation;

        let provider: Arc<dyn ModelProvider> = match translation.provider {
            ConfigTranslationProvider::Gemini => {
                let api_key = translation.get_api_key();
                if api_key.is_empty() {
                    return Err(anyhow!("API key is required for the Gemini provider"));
                }
                Arc::new(Gemini::new(
                    api_key,
                    translation.get_endpoint(),
                    translation.get_model(),
                    translation.get_timeout_secs(),
                ))
            }
            ConfigTranslationProvider::Ollama => Arc::new(Ollama::new(
                translation.get_endpoint(),
                translation.get_model(),
                translation.get_timeout_secs(),
            )),
        };

        let glossary = GlossaryStore::open(&config.glossary.path);

        let mut usage = TokenUsageStats::new();
        usage.provider = provider.name().to_string();

        Ok(Self {
            provider,
            glossary,
            classifier: Box::new(HeuristicClassifier::new()),
            temperature: translation.common.temperature,
            max_output_tokens: translation.common.max_output_tokens,
            record_translations: config.glossary.record_translations,
            strategy_override: None,
            usage: Mutex::new(usage),
        })
    }

    /// Create a pipeline from explicit parts, for tests
    pub fn with_parts(provider: Arc<dyn ModelProvider>, glossary: GlossaryStore) -> Self {
        let mut usage = TokenUsageStats::new();
        usage.provider = provider.name().to_string();

        Self {
            provider,
            glossary,
            classifier: Box::new(HeuristicClassifier::new()),
            temperature: 0.3,
            max_output_tokens: 1024,
            record_translations: true,
            strategy_override: None,
            usage: Mutex::new(usage),
        }
    }

    /// Replace the classifier implementation
    pub fn with_classifier(mut self, classifier: Box<dyn ComplexityClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Force a prompt strategy instead of consulting the classifier
    ///
    /// This is the only way to reach `stepwise-reasoning`.
    pub fn with_strategy_override(mut self, strategy: Option<PromptStrategy>) -> Self {
        self.strategy_override = strategy;
        self
    }

    /// Disable or enable recording successful translations into the glossary
    pub fn with_recording(mut self, record_translations: bool) -> Self {
        self.record_translations = record_translations;
        self
    }

    /// Access the shared glossary store
    pub fn glossary(&self) -> &GlossaryStore {
        &self.glossary
    }

    /// Resolve one translation request
    ///
    /// Retrieval completes (hit or miss) before any model invocation; the
    /// model is never called speculatively.
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        let target = language_utils::canonical_language_name(&request.target_language);

        if request.text.trim().is_empty() {
            return normalize(
                ResultDraft::new()
                    .target_language(target.clone())
                    .status(ResultStatus::Error)
                    .error("empty input text"),
                &target,
            );
        }

        let canonical = TranslationRequest {
            text: request.text.clone(),
            target_language: target.clone(),
            source_language: request
                .source_language
                .as_deref()
                .map(language_utils::canonical_language_name),
        };

        // Stage 1: glossary retrieval against one consistent snapshot
        let view = self.glossary.snapshot();
        if let Some(hit) = RetrievalResolver::resolve(&view, &canonical) {
            self.glossary.record_hit();
            return hit;
        }
        self.glossary.record_miss();

        // Stage 2: strategy selection and prompt rendering
        let strategy = self
            .strategy_override
            .unwrap_or_else(|| self.classifier.classify(&canonical.text));
        debug!("Resolver miss, using strategy '{}' via {}", strategy, self.provider.name());

        let prompt = PromptBuilder::build(
            strategy,
            &canonical.text,
            &canonical.target_language,
            canonical.source_language.as_deref(),
        );

        let model_request = ModelRequest::new(prompt)
            .temperature(self.temperature)
            .max_output_tokens(self.max_output_tokens)
            .function_schema(translate_text_schema());

        // Stage 3: model invocation and interpretation
        let started = Instant::now();
        match self.provider.invoke(model_request).await {
            Ok(response) => {
                self.usage
                    .lock()
                    .add_invocation(response.usage, started.elapsed());

                let result = ResponseInterpreter::interpret(&response, &canonical);

                if result.status == ResultStatus::Success && self.record_translations {
                    self.add_to_glossary(
                        &canonical.text,
                        &canonical.target_language,
                        &result.translated_text,
                    );
                }

                result
            }
            Err(e) => {
                self.usage.lock().add_invocation(None, started.elapsed());
                warn!("Model invocation failed: {}", e);

                normalize(
                    ResultDraft::new()
                        .source_language(
                            canonical
                                .source_language
                                .unwrap_or_else(|| crate::translation::result::AUTO_DETECTED.to_string()),
                        )
                        .target_language(target.clone())
                        .status(ResultStatus::Error)
                        .error(format!("model invocation failed: {}", e)),
                    &target,
                )
            }
        }
    }

    /// Record a phrase translation into the glossary and persist it
    ///
    /// Returns false when persistence failed; the entry stays in memory but
    /// must be considered not persisted.
    pub fn add_to_glossary(&self, phrase: &str, language: &str, translation: &str) -> bool {
        if translation.trim().is_empty() {
            return false;
        }

        self.glossary.insert(phrase, language, translation);
        let persisted = self.glossary.save();
        if !persisted {
            warn!("Glossary entry for '{}' was not persisted", phrase);
        }
        persisted
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<()> {
        self.provider
            .test_connection()
            .await
            .map_err(|e| anyhow!("Failed to connect to {}: {}", self.provider.name(), e))
    }

    /// Snapshot of the accumulated usage statistics
    pub fn usage_stats(&self) -> TokenUsageStats {
        self.usage.lock().clone()
    }
}

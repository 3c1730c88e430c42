/*!
 * # traduki - AI Translation Orchestrator
 *
 * A Rust library for glossary-first text translation using AI.
 *
 * ## Features
 *
 * - Serve repeated translations from a persistent glossary without model calls
 * - Compositional (word-by-word) glossary fallback for unseen phrases
 * - Complexity-driven prompt strategy selection (minimal, single-example,
 *   multi-example, stepwise-reasoning)
 * - Structured-output schema with graceful free-text fallback parsing
 * - One canonical result shape regardless of resolution path
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The request resolution pipeline:
 *   - `translation::core`: Pipeline orchestration
 *   - `translation::glossary`: Persistent phrase cache
 *   - `translation::resolver`: Exact and compositional retrieval
 *   - `translation::classifier`: Complexity heuristics
 *   - `translation::prompts`: Strategy templates and the structured schema
 *   - `translation::interpreter`: Three-tier response interpretation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Language identifier utilities
 * - `providers`: Client implementations for model providers:
 *   - `providers::gemini`: Google Generative Language API client
 *   - `providers::ollama`: Ollama API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, GlossaryError, ProviderError, TranslationError};
pub use language_utils::{canonical_language_name, languages_match};
pub use translation::{
    PromptStrategy, ResultStatus, TranslationPipeline, TranslationRequest, TranslationResult,
};

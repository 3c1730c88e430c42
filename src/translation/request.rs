/*!
 * Translation request value object.
 */

use serde::{Deserialize, Serialize};

/// A single translation request
///
/// Immutable once constructed for one resolution attempt. The pipeline never
/// mutates a request; language canonicalization produces a fresh value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,

    /// Target language identifier
    pub target_language: String,

    /// Source language identifier, when the caller knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
}

impl TranslationRequest {
    /// Create a new request with an unknown source language
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            source_language: None,
        }
    }

    /// Set the source language
    pub fn with_source_language(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = Some(source_language.into());
        self
    }
}

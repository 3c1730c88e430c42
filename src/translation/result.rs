/*!
 * Canonical translation result shape and the output normalizer.
 *
 * Every resolution path (glossary hit, structured extraction, free-text
 * fallback, upstream failure) funnels through `normalize` so callers always
 * receive the same well-formed shape.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source-language marker used when no language was supplied or inferred
pub const AUTO_DETECTED: &str = "auto-detected";

/// Outcome status of a translation resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// The request was fully satisfied
    Success,
    /// Usable output was produced, but with degraded fidelity
    PartialSuccess,
    /// The request could not be satisfied
    Error,
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::PartialSuccess => write!(f, "partial_success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Canonical translation result
///
/// Invariants: `status == Error` implies `error` is set; `status == Success`
/// implies `error` is unset. `confidence` is always within [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Source language the translation was made from
    pub source_language: String,

    /// Target language the translation was made into
    pub target_language: String,

    /// The translated text (may be empty on error)
    pub translated_text: String,

    /// Outcome status
    pub status: ResultStatus,

    /// Instant the result was produced
    pub timestamp: DateTime<Utc>,

    /// Confidence score in [0, 1]
    pub confidence: f32,

    /// Notes about cultural context or result provenance
    pub cultural_notes: String,

    /// Diagnostic message, set when status is not success
    pub error: Option<String>,
}

impl TranslationResult {
    /// Convert back into a draft, for re-normalization
    pub fn into_draft(self) -> ResultDraft {
        ResultDraft {
            source_language: Some(self.source_language),
            target_language: Some(self.target_language),
            translated_text: Some(self.translated_text),
            status: Some(self.status),
            confidence: Some(self.confidence),
            cultural_notes: Some(self.cultural_notes),
            error: self.error,
        }
    }
}

/// Partial result fields, as produced by the resolution paths
#[derive(Debug, Clone, Default)]
pub struct ResultDraft {
    /// Source language, when known
    pub source_language: Option<String>,

    /// Target language, when carried by the path
    pub target_language: Option<String>,

    /// Translated text, when produced
    pub translated_text: Option<String>,

    /// Status, when the path decided one
    pub status: Option<ResultStatus>,

    /// Confidence, when reported
    pub confidence: Option<f32>,

    /// Provenance or cultural notes
    pub cultural_notes: Option<String>,

    /// Diagnostic message
    pub error: Option<String>,
}

impl ResultDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source language
    pub fn source_language(mut self, value: impl Into<String>) -> Self {
        self.source_language = Some(value.into());
        self
    }

    /// Set the target language
    pub fn target_language(mut self, value: impl Into<String>) -> Self {
        self.target_language = Some(value.into());
        self
    }

    /// Set the translated text
    pub fn translated_text(mut self, value: impl Into<String>) -> Self {
        self.translated_text = Some(value.into());
        self
    }

    /// Set the status
    pub fn status(mut self, value: ResultStatus) -> Self {
        self.status = Some(value);
        self
    }

    /// Set the confidence
    pub fn confidence(mut self, value: f32) -> Self {
        self.confidence = Some(value);
        self
    }

    /// Set the cultural notes
    pub fn cultural_notes(mut self, value: impl Into<String>) -> Self {
        self.cultural_notes = Some(value.into());
        self
    }

    /// Set the diagnostic message
    pub fn error(mut self, value: impl Into<String>) -> Self {
        self.error = Some(value.into());
        self
    }
}

/// Fill every required field of a draft with its default and enforce the
/// result invariants.
///
/// Defaults: source language "auto-detected", target language from the
/// caller, empty translated text, success status, confidence 1.0, empty
/// cultural notes, no error, timestamp refreshed to now. Idempotent up to
/// the timestamp refresh.
pub fn normalize(draft: ResultDraft, requested_target: &str) -> TranslationResult {
    let status = draft.status.unwrap_or(ResultStatus::Success);

    // status=error implies a populated error; status=success implies none
    let error = match status {
        ResultStatus::Success => None,
        ResultStatus::Error => Some(
            draft
                .error
                .unwrap_or_else(|| "unspecified error".to_string()),
        ),
        ResultStatus::PartialSuccess => draft.error,
    };

    TranslationResult {
        source_language: draft
            .source_language
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| AUTO_DETECTED.to_string()),
        target_language: draft
            .target_language
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| requested_target.to_string()),
        translated_text: draft.translated_text.unwrap_or_default(),
        status,
        timestamp: Utc::now(),
        confidence: draft.confidence.unwrap_or(1.0).clamp(0.0, 1.0),
        cultural_notes: draft.cultural_notes.unwrap_or_default(),
        error,
    }
}

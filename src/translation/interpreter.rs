/*!
 * Response interpretation: structured call, scraped payload, or raw text.
 *
 * The model boundary does not guarantee that the structured-output schema is
 * honored, so interpretation degrades through three tiers instead of failing
 * the request. The tiers are modeled as one variant type consumed by a
 * single normalization step.
 */

use log::debug;
use serde::Deserialize;

use crate::providers::{ModelResponse, StructuredCall};
use crate::translation::request::TranslationRequest;
use crate::translation::result::{normalize, ResultDraft, ResultStatus, TranslationResult, AUTO_DETECTED};

/// Structured translation payload, as produced by the translate_text schema
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredPayload {
    /// Original input text, echoed by the model
    #[serde(default)]
    pub text: Option<String>,

    /// Source language named by the model
    #[serde(rename = "sourceLang")]
    pub source_lang: String,

    /// Target language named by the model
    #[serde(rename = "targetLang")]
    pub target_lang: String,

    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,

    /// Model-supplied confidence
    #[serde(default)]
    pub confidence: Option<f32>,

    /// Model-supplied cultural notes
    #[serde(rename = "culturalNotes", default)]
    pub cultural_notes: Option<String>,
}

impl StructuredPayload {
    /// Check the required fields are present and non-empty
    fn is_complete(&self) -> bool {
        !self.source_lang.trim().is_empty()
            && !self.target_lang.trim().is_empty()
            && !self.translated_text.trim().is_empty()
    }
}

/// How a model response was understood
#[derive(Debug, Clone)]
pub enum Interpretation {
    /// The provider emitted a usable function-call payload
    Structured(StructuredPayload),

    /// A payload was scraped out of the free-text response
    Scraped(StructuredPayload),

    /// Free text only; `parse_failure` is set when a detected span failed to parse
    RawText {
        /// Trimmed response text
        text: String,
        /// Diagnostic from a failed span parse, if one was attempted
        parse_failure: Option<String>,
    },
}

/// Interprets raw model responses into canonical results
pub struct ResponseInterpreter;

impl ResponseInterpreter {
    /// Classify a model response into one of the three tiers
    pub fn interpret_response(response: &ModelResponse) -> Interpretation {
        // Tier 1: structured function call
        if let Some(call) = &response.structured_call {
            if let Some(payload) = Self::payload_from_call(call) {
                debug!("Interpreted response via structured call '{}'", call.name);
                return Interpretation::Structured(payload);
            }
            debug!(
                "Structured call '{}' was incomplete, falling back to text",
                call.name
            );
        }

        // Tier 2: first balanced brace span in the free text
        let trimmed = response.text.trim();
        if let Some(span) = Self::find_balanced_span(trimmed) {
            match serde_json::from_str::<StructuredPayload>(span) {
                Ok(payload) if payload.is_complete() => {
                    debug!("Interpreted response via scraped payload");
                    return Interpretation::Scraped(payload);
                }
                Ok(_) => {
                    return Interpretation::RawText {
                        text: trimmed.to_string(),
                        parse_failure: Some(
                            "embedded payload was missing required fields".to_string(),
                        ),
                    };
                }
                Err(e) => {
                    return Interpretation::RawText {
                        text: trimmed.to_string(),
                        parse_failure: Some(format!("embedded span did not parse: {}", e)),
                    };
                }
            }
        }

        // Tier 3: plain text passthrough
        Interpretation::RawText {
            text: trimmed.to_string(),
            parse_failure: None,
        }
    }

    /// Interpret a response and normalize it against the originating request
    pub fn interpret(response: &ModelResponse, request: &TranslationRequest) -> TranslationResult {
        let target = &request.target_language;

        let draft = match Self::interpret_response(response) {
            Interpretation::Structured(payload) | Interpretation::Scraped(payload) => {
                let mut draft = ResultDraft::new()
                    .source_language(payload.source_lang)
                    .target_language(payload.target_lang)
                    .translated_text(payload.translated_text)
                    .status(ResultStatus::Success);
                if let Some(confidence) = payload.confidence {
                    draft = draft.confidence(confidence);
                }
                if let Some(notes) = payload.cultural_notes {
                    draft = draft.cultural_notes(notes);
                }
                draft
            }

            Interpretation::RawText { text, parse_failure } => {
                let source = request
                    .source_language
                    .clone()
                    .unwrap_or_else(|| AUTO_DETECTED.to_string());

                if text.is_empty() {
                    ResultDraft::new()
                        .source_language(source)
                        .target_language(target.clone())
                        .status(ResultStatus::Error)
                        .error("model returned an empty response")
                } else if let Some(diagnostic) = parse_failure {
                    // A span was found but could not be used: degraded output
                    ResultDraft::new()
                        .source_language(source)
                        .target_language(target.clone())
                        .translated_text(text)
                        .status(ResultStatus::PartialSuccess)
                        .error(format!("structured parsing failed: {}", diagnostic))
                } else {
                    // No span at all: the model followed the plain-text
                    // instruction, so this is a clean answer
                    ResultDraft::new()
                        .source_language(source)
                        .target_language(target.clone())
                        .translated_text(text)
                        .status(ResultStatus::Success)
                }
            }
        };

        normalize(draft, target)
    }

    /// Build a payload from function-call arguments, when complete
    fn payload_from_call(call: &StructuredCall) -> Option<StructuredPayload> {
        let value = serde_json::Value::Object(call.args.clone());
        match serde_json::from_value::<StructuredPayload>(value) {
            Ok(payload) if payload.is_complete() => Some(payload),
            _ => None,
        }
    }

    /// Find the first balanced `{...}` span in a text.
    ///
    /// Counts braces only; brace characters inside string literals are not
    /// tracked. An unclosed opening brace yields no span.
    pub fn find_balanced_span(text: &str) -> Option<&str> {
        let start = text.find('{')?;
        let mut depth = 0usize;

        for (offset, ch) in text[start..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[start..start + offset + ch.len_utf8()]);
                    }
                }
                _ => {}
            }
        }

        None
    }
}

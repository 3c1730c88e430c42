/*!
 * Retrieval resolver: the glossary-first stage of the pipeline.
 *
 * A request is answered from the glossary when the whole phrase is known
 * (exact hit) or when every whitespace token of it is known (compositional
 * hit). Anything else is a miss and the request proceeds to the model path.
 */

use log::debug;

use crate::translation::glossary::{normalize_phrase, GlossaryView};
use crate::translation::request::TranslationRequest;
use crate::translation::result::{normalize, ResultDraft, ResultStatus, TranslationResult, AUTO_DETECTED};

/// Confidence reported for exact glossary hits
pub const EXACT_CONFIDENCE: f32 = 1.0;

/// Confidence reported for compositional (word-by-word) hits
pub const COMPOSITIONAL_CONFIDENCE: f32 = 0.9;

/// Provenance marker for exact hits
pub const NOTE_GLOSSARY: &str = "Retrieved from glossary";

/// Provenance marker for compositional hits
pub const NOTE_COMPOSED: &str = "Composed word-by-word from glossary entries";

/// Glossary-backed resolver
pub struct RetrievalResolver;

impl RetrievalResolver {
    /// Attempt to satisfy a request from the glossary
    ///
    /// Returns `None` on a miss. Never fails: empty text is a miss, and a
    /// token with attached punctuation simply misses its lookup, which
    /// correctly routes the request to the model path.
    pub fn resolve(view: &GlossaryView, request: &TranslationRequest) -> Option<TranslationResult> {
        let phrase = normalize_phrase(&request.text);
        if phrase.is_empty() {
            return None;
        }

        let target = &request.target_language;

        // Exact phrase lookup
        if let Some(translation) = view.translation_for(&phrase, target) {
            debug!("Glossary exact hit for '{}' -> {}", phrase, target);

            let draft = ResultDraft::new()
                .source_language(
                    request
                        .source_language
                        .clone()
                        .unwrap_or_else(|| AUTO_DETECTED.to_string()),
                )
                .target_language(target.clone())
                .translated_text(translation)
                .status(ResultStatus::Success)
                .confidence(EXACT_CONFIDENCE)
                .cultural_notes(NOTE_GLOSSARY);

            return Some(normalize(draft, target));
        }

        // Compositional fallback: every token must resolve on its own.
        // Token order is preserved; a compositional hit never inherits a
        // caller-supplied source language.
        let tokens: Vec<&str> = phrase.split_whitespace().collect();
        let translated: Option<Vec<&str>> = tokens
            .iter()
            .map(|token| view.translation_for(token, target))
            .collect();

        if let Some(parts) = translated {
            debug!(
                "Glossary compositional hit for '{}' ({} tokens) -> {}",
                phrase,
                parts.len(),
                target
            );

            let draft = ResultDraft::new()
                .source_language(AUTO_DETECTED)
                .target_language(target.clone())
                .translated_text(parts.join(" "))
                .status(ResultStatus::Success)
                .confidence(COMPOSITIONAL_CONFIDENCE)
                .cultural_notes(NOTE_COMPOSED);

            return Some(normalize(draft, target));
        }

        None
    }
}

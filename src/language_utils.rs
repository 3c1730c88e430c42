use anyhow::{Result, anyhow};
use isolang::Language;

/// Language identifier utilities
///
/// Requests and glossary entries address languages with free-form identifier
/// strings ("Spanish", "fr", "fra"). This module canonicalizes ISO 639-1 and
/// ISO 639-3 codes and known English language names to one display name so
/// that "fr", "fra" and "French" all hit the same glossary entries. Unknown
/// identifiers pass through verbatim.
/// Canonicalize a language identifier to an English display name.
///
/// Falls back to the trimmed input when the identifier is not a recognized
/// ISO code or English language name.
pub fn canonical_language_name(identifier: &str) -> String {
    let trimmed = identifier.trim();
    let lowered = trimmed.to_lowercase();

    if lowered.len() == 2 {
        if let Some(lang) = Language::from_639_1(&lowered) {
            return lang.to_name().to_string();
        }
    }

    if lowered.len() == 3 {
        if let Some(lang) = Language::from_639_3(&lowered) {
            return lang.to_name().to_string();
        }
    }

    if let Some(lang) = Language::from_name(trimmed) {
        return lang.to_name().to_string();
    }

    trimmed.to_string()
}

/// Check if two language identifiers refer to the same language
pub fn languages_match(first: &str, second: &str) -> bool {
    canonical_language_name(first).eq_ignore_ascii_case(&canonical_language_name(second))
}

/// Validate that a language identifier is usable as a request field
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(anyhow!("Language identifier cannot be empty"));
    }
    Ok(())
}

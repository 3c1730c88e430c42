/*!
 * Unit tests for the retrieval resolver
 */

use rand::Rng;

use crate::common;
use traduki::translation::glossary::GlossaryStore;
use traduki::translation::resolver::RetrievalResolver;
use traduki::translation::result::{ResultStatus, AUTO_DETECTED};
use traduki::translation::TranslationRequest;

#[test]
fn test_resolver_everyDefaultPhraseAndLanguage_shouldHitExactly() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();

    for (phrase, translations) in GlossaryStore::builtin_defaults() {
        for (language, expected) in translations {
            let request = TranslationRequest::new(&phrase, &language);
            let result = RetrievalResolver::resolve(&view, &request)
                .unwrap_or_else(|| panic!("miss for '{}' -> {}", phrase, language));

            assert_eq!(result.status, ResultStatus::Success);
            assert_eq!(result.confidence, 1.0);
            assert_eq!(result.translated_text, expected);
        }
    }
}

#[test]
fn test_resolver_randomizedCasingAndPadding_shouldStillHit() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();
    let mut rng = rand::rng();

    for _ in 0..20 {
        let mangled: String = "hello"
            .chars()
            .map(|c| {
                if rng.random_bool(0.5) {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect();
        let padded = format!(
            "{}{}{}",
            " ".repeat(rng.random_range(0..4)),
            mangled,
            " ".repeat(rng.random_range(0..4))
        );

        let request = TranslationRequest::new(&padded, "Spanish");
        let result = RetrievalResolver::resolve(&view, &request)
            .unwrap_or_else(|| panic!("miss for {:?}", padded));
        assert_eq!(result.translated_text, "hola");
    }
}

#[test]
fn test_resolver_compositional_shouldJoinInOriginalOrder() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();

    let request = TranslationRequest::new("hello goodbye", "French");
    let result = RetrievalResolver::resolve(&view, &request).unwrap();

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.confidence, 0.9);
    assert_eq!(result.translated_text, "bonjour au revoir");
}

#[test]
fn test_resolver_compositional_shouldForceAutoDetectedSource() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();

    let request =
        TranslationRequest::new("yes no", "German").with_source_language("English");
    let result = RetrievalResolver::resolve(&view, &request).unwrap();

    assert_eq!(result.translated_text, "ja nein");
    assert_eq!(result.source_language, AUTO_DETECTED);
}

#[test]
fn test_resolver_anyUnknownToken_shouldMiss() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();

    for text in ["xyzzy", "hello xyzzy", "xyzzy hello", "hello xyzzy goodbye"] {
        let request = TranslationRequest::new(text, "French");
        assert!(
            RetrievalResolver::resolve(&view, &request).is_none(),
            "expected miss for {:?}",
            text
        );
    }
}

#[test]
fn test_resolver_knownPhraseUnknownLanguage_shouldMiss() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();

    let request = TranslationRequest::new("hello", "Klingon");
    assert!(RetrievalResolver::resolve(&view, &request).is_none());
}

#[test]
fn test_resolver_punctuatedToken_shouldMissAndFallThrough() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();

    // Punctuation is not stripped, so "hello!" is an unknown key
    let request = TranslationRequest::new("hello!", "Spanish");
    assert!(RetrievalResolver::resolve(&view, &request).is_none());
}

#[test]
fn test_resolver_emptyText_shouldMissWithoutPanicking() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::empty_store(&dir);
    let view = store.snapshot();

    for text in ["", "   ", "\t\n"] {
        let request = TranslationRequest::new(text, "French");
        assert!(RetrievalResolver::resolve(&view, &request).is_none());
    }
}

#[test]
fn test_resolver_exactHitTimestampAndNotes_shouldBeNormalized() {
    let dir = common::create_temp_dir().unwrap();
    let store = common::default_store(&dir);
    let view = store.snapshot();

    let request = TranslationRequest::new("hello", "Spanish");
    let result = RetrievalResolver::resolve(&view, &request).unwrap();

    assert!(!result.cultural_notes.is_empty());
    assert!(result.error.is_none());
}

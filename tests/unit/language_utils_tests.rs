/*!
 * Unit tests for language identifier utilities
 */

use traduki::language_utils::{canonical_language_name, languages_match, validate_identifier};

#[test]
fn test_canonicalLanguageName_iso6391Codes_shouldResolveToNames() {
    assert_eq!(canonical_language_name("fr"), "French");
    assert_eq!(canonical_language_name("es"), "Spanish");
    assert_eq!(canonical_language_name("de"), "German");
}

#[test]
fn test_canonicalLanguageName_iso6393Codes_shouldResolveToNames() {
    assert_eq!(canonical_language_name("fra"), "French");
    assert_eq!(canonical_language_name("spa"), "Spanish");
    assert_eq!(canonical_language_name("deu"), "German");
}

#[test]
fn test_canonicalLanguageName_englishNames_shouldPassThroughCanonicalized() {
    assert_eq!(canonical_language_name("French"), "French");
    assert_eq!(canonical_language_name("  Spanish  "), "Spanish");
}

#[test]
fn test_canonicalLanguageName_unknownIdentifier_shouldPassThroughVerbatim() {
    assert_eq!(canonical_language_name("Klingon"), "Klingon");
    assert_eq!(canonical_language_name(" Elvish "), "Elvish");
}

#[test]
fn test_languagesMatch_codeAndName_shouldMatch() {
    assert!(languages_match("fr", "French"));
    assert!(languages_match("fra", "fr"));
    assert!(languages_match("Spanish", "es"));
    assert!(!languages_match("fr", "Spanish"));
}

#[test]
fn test_languagesMatch_unknownIdentifiers_shouldCompareCaseInsensitively() {
    assert!(languages_match("klingon", "Klingon"));
    assert!(!languages_match("Klingon", "Elvish"));
}

#[test]
fn test_validateIdentifier_emptyInput_shouldFail() {
    assert!(validate_identifier("French").is_ok());
    assert!(validate_identifier("").is_err());
    assert!(validate_identifier("   ").is_err());
}

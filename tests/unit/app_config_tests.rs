/*!
 * Unit tests for application configuration
 */

use traduki::app_config::{Config, TranslationProvider};

#[test]
fn test_config_default_shouldListBothProviders() {
    let config = Config::default();

    assert_eq!(config.translation.provider, TranslationProvider::Gemini);
    assert_eq!(config.translation.available_providers.len(), 2);
    assert!(config
        .translation
        .available_providers
        .iter()
        .any(|p| p.provider_type == "ollama"));
}

#[test]
fn test_config_default_shouldCarryGlossaryDefaults() {
    let config = Config::default();

    assert!(config.glossary.record_translations);
    assert!(config.glossary.path.ends_with("glossary.json"));
}

#[test]
fn test_config_serdeRoundTrip_shouldPreserveProviderTable() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.translation.provider, config.translation.provider);
    assert_eq!(
        parsed.translation.available_providers.len(),
        config.translation.available_providers.len()
    );
    assert_eq!(parsed.target_language, config.target_language);
}

#[test]
fn test_config_minimalJson_shouldFillDefaults() {
    let json = r#"{
        "target_language": "Spanish",
        "translation": {}
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.target_language, "Spanish");
    assert_eq!(config.translation.common.temperature, 0.3);
    assert_eq!(config.translation.common.max_output_tokens, 1024);
    assert!(config.glossary.record_translations);
}

#[test]
fn test_validate_geminiWithoutApiKey_shouldFail() {
    let config = Config::default();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_geminiWithApiKey_shouldPass() {
    let mut config = Config::default();
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "gemini")
    {
        provider.api_key = "test-key".to_string();
    }

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_ollama_shouldNotRequireApiKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_emptyTargetLanguage_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.target_language = String::new();

    assert!(config.validate().is_err());
}

#[test]
fn test_translationConfig_accessors_shouldFallBackToProviderDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();

    assert_eq!(config.translation.get_model(), "gemini-1.5-flash");
    assert!(config.translation.get_endpoint().contains("generativelanguage"));
    assert_eq!(config.translation.get_timeout_secs(), 60);

    config.translation.provider = TranslationProvider::Ollama;
    assert_eq!(config.translation.get_model(), "llama3.2");
    assert!(config.translation.get_endpoint().contains("localhost:11434"));
    assert_eq!(config.translation.get_timeout_secs(), 30);
}

#[test]
fn test_translationProvider_fromStr_shouldParseKnownNames() {
    use std::str::FromStr;

    assert_eq!(TranslationProvider::from_str("gemini").unwrap(), TranslationProvider::Gemini);
    assert_eq!(TranslationProvider::from_str("OLLAMA").unwrap(), TranslationProvider::Ollama);
    assert!(TranslationProvider::from_str("openai").is_err());
}

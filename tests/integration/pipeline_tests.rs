/*!
 * End-to-end pipeline tests with mock providers
 */

use std::sync::Arc;

use crate::common;
use traduki::providers::mock::MockProvider;
use traduki::providers::ModelResponse;
use traduki::translation::result::AUTO_DETECTED;
use traduki::translation::{
    PromptStrategy, ResultStatus, TranslationPipeline, TranslationRequest,
};

#[tokio::test]
async fn test_pipeline_glossaryHit_shouldNotInvokeProvider() {
    common::init_logging();
    let dir = common::create_temp_dir().unwrap();
    // A failing provider proves the model path was never taken
    let pipeline =
        TranslationPipeline::with_parts(Arc::new(MockProvider::failing()), common::default_store(&dir));

    let request = TranslationRequest::new("hello", "Spanish");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.translated_text, "hola");
    assert_eq!(result.confidence, 1.0);

    let (hits, misses, _) = pipeline.glossary().stats();
    assert_eq!((hits, misses), (1, 0));
}

#[tokio::test]
async fn test_pipeline_compositionalHit_shouldNotInvokeProvider() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline =
        TranslationPipeline::with_parts(Arc::new(MockProvider::failing()), common::default_store(&dir));

    let request = TranslationRequest::new("hello goodbye", "French");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.translated_text, "bonjour au revoir");
    assert_eq!(result.confidence, 0.9);
    assert_eq!(result.source_language, AUTO_DETECTED);
}

#[tokio::test]
async fn test_pipeline_targetLanguageCode_shouldStillHitGlossary() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline =
        TranslationPipeline::with_parts(Arc::new(MockProvider::failing()), common::default_store(&dir));

    // "es" canonicalizes to "Spanish" before retrieval
    let request = TranslationRequest::new("hello", "es");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.translated_text, "hola");
    assert_eq!(result.target_language, "Spanish");
}

#[tokio::test]
async fn test_pipeline_missWithPlainTextResponse_shouldPassTextThrough() {
    let dir = common::create_temp_dir().unwrap();
    let provider = MockProvider::plain_text().with_custom_response(|_| ModelResponse {
        text: "plugh xyzzy".to_string(),
        structured_call: None,
        usage: None,
    });
    let pipeline = TranslationPipeline::with_parts(Arc::new(provider), common::empty_store(&dir))
        .with_recording(false);

    let request = TranslationRequest::new("xyzzy plugh", "French");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.translated_text, "plugh xyzzy");

    let (hits, misses, _) = pipeline.glossary().stats();
    assert_eq!((hits, misses), (0, 1));
}

#[tokio::test]
async fn test_pipeline_missWithStructuredResponse_shouldMirrorCall() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline = TranslationPipeline::with_parts(
        Arc::new(MockProvider::structured()),
        common::empty_store(&dir),
    )
    .with_recording(false);

    let request = TranslationRequest::new("hello world", "French");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.translated_text, "bonjour le monde");
    assert_eq!(result.source_language, "English");
    assert_eq!(result.confidence, 0.95);
}

#[tokio::test]
async fn test_pipeline_malformedSpanResponse_shouldDegradeGracefully() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline = TranslationPipeline::with_parts(
        Arc::new(MockProvider::malformed_span()),
        common::empty_store(&dir),
    )
    .with_recording(false);

    let request = TranslationRequest::new("hello world", "French");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.status, ResultStatus::PartialSuccess);
    assert!(result.error.is_some());
    assert!(!result.translated_text.is_empty());
}

#[tokio::test]
async fn test_pipeline_providerFailure_shouldSurfaceErrorResult() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline =
        TranslationPipeline::with_parts(Arc::new(MockProvider::failing()), common::empty_store(&dir));

    let request = TranslationRequest::new("anything at all", "French");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.status, ResultStatus::Error);
    assert!(result.translated_text.is_empty());
    let error = result.error.expect("diagnostic expected");
    assert!(error.contains("model invocation failed"));
}

#[tokio::test]
async fn test_pipeline_emptyText_shouldReturnErrorWithoutProviderCall() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline =
        TranslationPipeline::with_parts(Arc::new(MockProvider::failing()), common::empty_store(&dir));

    let request = TranslationRequest::new("   ", "French");
    let result = pipeline.translate(&request).await;

    assert_eq!(result.status, ResultStatus::Error);
    assert_eq!(result.error.as_deref(), Some("empty input text"));

    // Neither a hit nor a miss was recorded: retrieval was never reached
    let (hits, misses, _) = pipeline.glossary().stats();
    assert_eq!((hits, misses), (0, 0));
}

#[tokio::test]
async fn test_pipeline_successfulModelPath_shouldRecordIntoGlossary() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline = TranslationPipeline::with_parts(
        Arc::new(MockProvider::plain_text()),
        common::empty_store(&dir),
    );

    let request = TranslationRequest::new("hello world", "French");
    let first = pipeline.translate(&request).await;
    assert_eq!(first.status, ResultStatus::Success);
    assert_eq!(first.translated_text, "bonjour le monde");

    // The recorded entry must now satisfy the same request from the glossary
    let view = pipeline.glossary().snapshot();
    assert_eq!(view.translation_for("hello world", "French"), Some("bonjour le monde"));

    let second = pipeline.translate(&request).await;
    assert_eq!(second.confidence, 1.0);
    assert_eq!(second.cultural_notes, "Retrieved from glossary");

    let (hits, misses, _) = pipeline.glossary().stats();
    assert_eq!((hits, misses), (1, 1));
}

#[tokio::test]
async fn test_pipeline_strategyOverride_shouldReachStepwiseReasoning() {
    let dir = common::create_temp_dir().unwrap();
    // Echo the rendered prompt back so the chosen template is observable
    let provider = MockProvider::plain_text().with_custom_response(|req| ModelResponse {
        text: req.prompt.clone(),
        structured_call: None,
        usage: None,
    });
    let pipeline = TranslationPipeline::with_parts(Arc::new(provider), common::empty_store(&dir))
        .with_recording(false)
        .with_strategy_override(Some(PromptStrategy::StepwiseReasoning));

    let request = TranslationRequest::new("untranslatable gibberish", "French");
    let result = pipeline.translate(&request).await;

    assert!(result.translated_text.contains("Work through these steps"));
}

#[tokio::test]
async fn test_pipeline_shortText_shouldRenderMinimalTemplate() {
    let dir = common::create_temp_dir().unwrap();
    let provider = MockProvider::plain_text().with_custom_response(|req| ModelResponse {
        text: req.prompt.clone(),
        structured_call: None,
        usage: None,
    });
    let pipeline = TranslationPipeline::with_parts(Arc::new(provider), common::empty_store(&dir))
        .with_recording(false);

    // Two plain words, no idiom, no symbols: the classifier picks minimal
    let request = TranslationRequest::new("xyzzy plugh", "French");
    let result = pipeline.translate(&request).await;

    assert!(!result.translated_text.contains("Example"));
    assert!(result.translated_text.contains("\"xyzzy plugh\""));
}

#[tokio::test]
async fn test_pipeline_usageStats_shouldAccumulateAcrossInvocations() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline = TranslationPipeline::with_parts(
        Arc::new(MockProvider::structured()),
        common::empty_store(&dir),
    )
    .with_recording(false);

    for text in ["one unknown phrase", "another unknown phrase"] {
        let request = TranslationRequest::new(text, "French");
        pipeline.translate(&request).await;
    }

    let stats = pipeline.usage_stats();
    assert_eq!(stats.request_count, 2);
    assert_eq!(stats.total_units, 118);
    assert_eq!(stats.provider, "mock");
}

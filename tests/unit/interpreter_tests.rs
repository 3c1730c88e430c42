/*!
 * Unit tests for the three-tier response interpreter
 */

use serde_json::json;

use traduki::providers::{ModelResponse, StructuredCall};
use traduki::translation::interpreter::{Interpretation, ResponseInterpreter};
use traduki::translation::result::{ResultStatus, AUTO_DETECTED};
use traduki::translation::TranslationRequest;

fn call_with(args: serde_json::Value) -> StructuredCall {
    StructuredCall {
        name: "translate_text".to_string(),
        args: args.as_object().cloned().unwrap(),
    }
}

fn text_response(text: &str) -> ModelResponse {
    ModelResponse {
        text: text.to_string(),
        structured_call: None,
        usage: None,
    }
}

fn request() -> TranslationRequest {
    TranslationRequest::new("hello world", "French")
}

#[test]
fn test_interpreter_validCall_shouldMirrorArgumentsExactly() {
    let response = ModelResponse {
        text: String::new(),
        structured_call: Some(call_with(json!({
            "text": "hello world",
            "sourceLang": "English",
            "targetLang": "French",
            "translatedText": "bonjour le monde",
            "confidence": 0.87,
            "culturalNotes": "informal register"
        }))),
        usage: None,
    };

    let result = ResponseInterpreter::interpret(&response, &request());

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.source_language, "English");
    assert_eq!(result.target_language, "French");
    assert_eq!(result.translated_text, "bonjour le monde");
    assert_eq!(result.confidence, 0.87);
    assert_eq!(result.cultural_notes, "informal register");
    assert!(result.error.is_none());
}

#[test]
fn test_interpreter_callMissingRequiredField_shouldFallToTextTiers() {
    let response = ModelResponse {
        text: "bonjour le monde".to_string(),
        structured_call: Some(call_with(json!({
            "sourceLang": "English",
            "targetLang": ""
        }))),
        usage: None,
    };

    let interpretation = ResponseInterpreter::interpret_response(&response);
    assert!(matches!(interpretation, Interpretation::RawText { .. }));
}

#[test]
fn test_interpreter_embeddedBlock_shouldParseAsSuccess() {
    let response = text_response(
        "Here you go: {\"sourceLang\": \"English\", \"targetLang\": \"French\", \
         \"translatedText\": \"X\"} -- done",
    );

    let result = ResponseInterpreter::interpret(&response, &request());

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.translated_text, "X");
}

#[test]
fn test_interpreter_embeddedBlock_shouldUseFirstBalancedSpanOnly() {
    let response = text_response(
        "{\"sourceLang\": \"English\", \"targetLang\": \"French\", \"translatedText\": \"first\"} \
         {\"sourceLang\": \"English\", \"targetLang\": \"French\", \"translatedText\": \"second\"}",
    );

    let result = ResponseInterpreter::interpret(&response, &request());
    assert_eq!(result.translated_text, "first");
}

#[test]
fn test_interpreter_unparsableSpan_shouldDegradeToPartialSuccess() {
    let response = text_response("Answer: {not json at all}");

    let result = ResponseInterpreter::interpret(&response, &request());

    assert_eq!(result.status, ResultStatus::PartialSuccess);
    assert_eq!(result.translated_text, "Answer: {not json at all}");
    let diagnostic = result.error.expect("diagnostic expected");
    assert!(diagnostic.contains("structured parsing failed"));
}

#[test]
fn test_interpreter_spanWithIncompletePayload_shouldDegradeToPartialSuccess() {
    // Parses as JSON, but translatedText is missing
    let response = text_response("{\"sourceLang\": \"English\", \"targetLang\": \"French\"}");

    let interpretation = ResponseInterpreter::interpret_response(&response);
    match interpretation {
        Interpretation::RawText { parse_failure, .. } => assert!(parse_failure.is_some()),
        other => panic!("expected RawText, got {:?}", other),
    }
}

#[test]
fn test_interpreter_plainText_shouldPassThroughTrimmed() {
    let response = text_response("\n  plugh xyzzy \n");

    let result = ResponseInterpreter::interpret(&response, &request());

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.translated_text, "plugh xyzzy");
    assert_eq!(result.source_language, AUTO_DETECTED);
    assert_eq!(result.target_language, "French");
    assert!(result.error.is_none());
}

#[test]
fn test_interpreter_rawTextTier_shouldTakeLanguagesFromRequest() {
    let response = text_response("hallo welt");
    let request = TranslationRequest::new("hello world", "German").with_source_language("English");

    let result = ResponseInterpreter::interpret(&response, &request);

    assert_eq!(result.source_language, "English");
    assert_eq!(result.target_language, "German");
}

#[test]
fn test_interpreter_emptyText_shouldYieldErrorResult() {
    let result = ResponseInterpreter::interpret(&text_response("   "), &request());

    assert_eq!(result.status, ResultStatus::Error);
    assert!(result.translated_text.is_empty());
    assert!(result.error.is_some());
}

#[test]
fn test_interpreter_tierPriority_callBeatsEmbeddedBlock() {
    let response = ModelResponse {
        text: "{\"sourceLang\": \"English\", \"targetLang\": \"French\", \
               \"translatedText\": \"from the text\"}"
            .to_string(),
        structured_call: Some(call_with(json!({
            "text": "hello world",
            "sourceLang": "English",
            "targetLang": "French",
            "translatedText": "from the call"
        }))),
        usage: None,
    };

    let result = ResponseInterpreter::interpret(&response, &request());
    assert_eq!(result.translated_text, "from the call");
}

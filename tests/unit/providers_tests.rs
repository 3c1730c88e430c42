/*!
 * Unit tests for provider request/response shapes and the mock provider
 */

use traduki::providers::gemini::{Gemini, GeminiRequest};
use traduki::providers::mock::MockProvider;
use traduki::providers::{ModelProvider, ModelRequest};
use traduki::translation::prompts::translate_text_schema;

#[test]
fn test_modelRequest_builder_shouldClampTemperature() {
    let request = ModelRequest::new("prompt").temperature(3.0);
    assert_eq!(request.temperature, 1.0);

    let request = ModelRequest::new("prompt").temperature(-1.0);
    assert_eq!(request.temperature, 0.0);
}

#[test]
fn test_geminiRequest_serialization_shouldUseWireFieldNames() {
    let request = GeminiRequest::new("translate this")
        .generation_config(0.3, 256)
        .function_declaration(translate_text_schema());

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["contents"][0]["role"], "user");
    assert_eq!(value["contents"][0]["parts"][0]["text"], "translate this");
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 256);
    assert_eq!(
        value["tools"][0]["functionDeclarations"][0]["name"],
        "translate_text"
    );
}

#[test]
fn test_geminiResponse_parsing_shouldExtractTextAndFunctionCall() {
    let body = r#"{
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "intro "},
                    {"functionCall": {"name": "translate_text", "args": {"translatedText": "hola", "sourceLang": "English", "targetLang": "Spanish", "text": "hello"}}},
                    {"text": "outro"}
                ]
            }
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14}
    }"#;

    let response: traduki::providers::gemini::GeminiResponse = serde_json::from_str(body).unwrap();

    assert_eq!(Gemini::extract_text_from_response(&response), "intro outro");
    let call = Gemini::extract_function_call(&response).unwrap();
    assert_eq!(call.name, "translate_text");
    assert_eq!(call.args["translatedText"], "hola");
}

#[tokio::test]
async fn test_mockProvider_structured_shouldCarryUsage() {
    let provider = MockProvider::structured();
    let response = provider.invoke(ModelRequest::new("prompt")).await.unwrap();

    let usage = response.usage.unwrap();
    assert_eq!(usage.total_units, usage.prompt_units + usage.completion_units);
}

#[tokio::test]
async fn test_mockProvider_embeddedJson_shouldContainBalancedSpan() {
    let provider = MockProvider::embedded_json();
    let response = provider.invoke(ModelRequest::new("prompt")).await.unwrap();

    assert!(response.structured_call.is_none());
    assert!(response.text.contains('{') && response.text.contains('}'));
}

#[tokio::test]
async fn test_mockProvider_testConnection_shouldReflectBehavior() {
    assert!(MockProvider::plain_text().test_connection().await.is_ok());
    assert!(MockProvider::failing().test_connection().await.is_err());
}

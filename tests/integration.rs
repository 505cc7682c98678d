use base64::Engine as _;
use gemini_image_mcp::{
    ai::{gemini::ModelCatalog, GeminiImageClient, MockImageClient},
    image::{FileImageStore, MockImageStore},
    models::Config,
    server::ImageToolServer,
};
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn args(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

fn texts(result: &CallToolResult) -> Vec<String> {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.clone()))
        .collect()
}

fn gemini_client(server: &MockServer) -> GeminiImageClient {
    let config = Config::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some("integration-key".to_string()),
        "GEMINI_BASE_URL" => Some(server.uri()),
        _ => None,
    })
    .unwrap();
    GeminiImageClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_generate_and_save_through_gemini() {
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/v1beta/models/gemini-3.1-flash-image-preview:generateContent",
        ))
        .and(query_param("key", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Weighing the composition", "thought": true },
                        { "text": "A lighthouse at dusk" },
                        { "inlineData": { "mimeType": "image/png", "data": PNG_BASE64 } }
                    ]
                },
                "groundingMetadata": { "webSearchQueries": ["lighthouse photos"] }
            }]
        })))
        .expect(1)
        .mount(&gemini)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("renders/lighthouse.png");

    let server = ImageToolServer::new(
        Arc::new(gemini_client(&gemini)),
        Arc::new(FileImageStore::new()),
    );
    let result = server
        .dispatch_tool(
            "generate_image",
            args(json!({
                "prompt": "a lighthouse",
                "aspectRatio": "16:9",
                "useGoogleSearch": true,
                "outputPath": output.to_string_lossy()
            })),
        )
        .await;

    assert_ne!(result.is_error, Some(true));
    assert_eq!(result.content[0].as_image().unwrap().data, PNG_BASE64);
    assert_eq!(
        texts(&result),
        vec![
            format!("Image saved to: {}", output.display()),
            "A lighthouse at dusk".to_string(),
            "[Thinking] Weighing the composition".to_string(),
            "[Search queries] lighthouse photos".to_string(),
        ]
    );

    let written = std::fs::read(&output).unwrap();
    let expected = base64::engine::general_purpose::STANDARD
        .decode(PNG_BASE64)
        .unwrap();
    assert_eq!(written, expected);

    let requests = gemini.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["generationConfig"]["imageConfig"],
        json!({ "aspectRatio": "16:9", "imageSize": "1K" })
    );
    assert_eq!(body["tools"], json!([{ "google_search": {} }]));
}

#[tokio::test]
async fn test_edit_image_sends_source_images_after_prompt() {
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "inlineData": { "mimeType": "image/png", "data": PNG_BASE64 } }]
                }
            }]
        })))
        .mount(&gemini)
        .await;

    let server = ImageToolServer::new(
        Arc::new(gemini_client(&gemini)),
        Arc::new(MockImageStore::new()),
    );
    let result = server
        .dispatch_tool(
            "edit_image",
            args(json!({
                "prompt": "add a red hat",
                "images": [
                    { "data": "AAAA", "mimeType": "image/png" },
                    { "data": "BBBB", "mimeType": "image/jpeg" }
                ]
            })),
        )
        .await;

    assert_ne!(result.is_error, Some(true));
    assert_eq!(result.content.len(), 1);

    let requests = gemini.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["contents"][0]["parts"],
        json!([
            { "text": "add a red hat" },
            { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
            { "inlineData": { "mimeType": "image/jpeg", "data": "BBBB" } }
        ])
    );
    assert!(body["generationConfig"].get("imageConfig").is_none());
    assert!(body.get("tools").is_none());
}

#[tokio::test]
async fn test_gemini_failures_become_tool_errors() {
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Resource exhausted"))
        .mount(&gemini)
        .await;

    let server = ImageToolServer::new(
        Arc::new(gemini_client(&gemini)),
        Arc::new(MockImageStore::new()),
    );

    let result = server
        .dispatch_tool("generate_image", args(json!({ "prompt": "anything" })))
        .await;
    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        texts(&result),
        vec!["Failed to generate image: Gemini API error (429): Resource exhausted".to_string()]
    );

    let result = server
        .dispatch_tool(
            "describe_image",
            args(json!({ "images": [{ "data": "AAAA", "mimeType": "image/png" }] })),
        )
        .await;
    assert_eq!(
        texts(&result),
        vec!["Failed to describe image: Gemini API error (429): Resource exhausted".to_string()]
    );
}

#[tokio::test]
async fn test_empty_candidates_and_missing_image() {
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that" }] } }]
        })))
        .mount(&gemini)
        .await;

    let server = ImageToolServer::new(
        Arc::new(gemini_client(&gemini)),
        Arc::new(MockImageStore::new()),
    );
    let result = server
        .dispatch_tool("generate_image", args(json!({ "prompt": "x" })))
        .await;
    assert_eq!(
        texts(&result),
        vec!["Failed to generate image: No image data in Gemini response".to_string()]
    );
}

#[tokio::test]
async fn test_restricted_catalog_rejects_model_without_request() {
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gemini)
        .await;

    let client = gemini_client(&gemini).with_catalog(ModelCatalog::new(
        "gemini-3-pro-image-preview",
        ["gemini-3-pro-image-preview"],
    ));
    let server = ImageToolServer::new(Arc::new(client), Arc::new(MockImageStore::new()));

    let result = server
        .dispatch_tool(
            "generate_image",
            args(json!({ "prompt": "x", "model": "gemini-2.0-flash-exp" })),
        )
        .await;
    assert_eq!(
        texts(&result),
        vec![
            "Failed to generate image: Invalid model: gemini-2.0-flash-exp. Allowed: gemini-3-pro-image-preview"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_prompt_then_tool_round_trip_with_mocks() {
    let client = Arc::new(MockImageClient::new());
    let store = Arc::new(MockImageStore::new());
    let server = ImageToolServer::new(client.clone(), store.clone());

    let prompt = server
        .render_prompt("weather_infographic", args(json!({ "city": "Oslo" })))
        .unwrap();
    assert_eq!(prompt.messages.len(), 1);

    let result = server
        .dispatch_tool(
            "generate_image",
            args(json!({
                "prompt": "weather infographic for Oslo",
                "aspectRatio": "9:16",
                "imageSize": "2K",
                "useGoogleSearch": true,
                "outputPath": "weather/oslo.png"
            })),
        )
        .await;

    assert_ne!(result.is_error, Some(true));
    assert_eq!(texts(&result), vec!["Image saved to: /tmp/weather/oslo.png".to_string()]);
    assert_eq!(client.generate_calls()[0].use_google_search, Some(true));
    assert_eq!(store.saved()[0].0.to_string_lossy(), "/tmp/weather/oslo.png");
}

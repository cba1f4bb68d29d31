use axum::{
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use fridgechef_genai::{google::*, *};
use serde_json::{json, Value};
use std::{
    env,
    sync::{Arc, Mutex},
};

#[derive(Debug, Clone)]
struct RecordedRequest {
    path: String,
    api_key: Option<String>,
    body: Value,
}

type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Serve `POST /models/{action}` locally and answer with `status` and `body`.
async fn spawn_gemini(status: StatusCode, body: Value) -> (String, Recorded) {
    let recorded: Recorded = Arc::default();
    let sink = recorded.clone();

    let app = Router::new().route(
        "/models/{action}",
        post(move |headers: HeaderMap, uri: Uri, Json(request): Json<Value>| {
            let sink = sink.clone();
            let body = body.clone();
            async move {
                sink.lock().unwrap().push(RecordedRequest {
                    path: uri.path().to_string(),
                    api_key: headers
                        .get("x-goog-api-key")
                        .and_then(|value| value.to_str().ok())
                        .map(ToString::to_string),
                    body: request,
                });
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), recorded)
}

fn model(base_url: String) -> GoogleModel {
    GoogleModel::new(
        "gemini-test",
        GoogleModelOptions {
            api_key: "test-key".to_string(),
            base_url: Some(base_url),
            ..Default::default()
        },
    )
}

fn candidate(parts: &Value) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 7 }
    })
}

#[tokio::test]
async fn generate_sends_structured_output_request() {
    let (base_url, recorded) = spawn_gemini(
        StatusCode::OK,
        candidate(&json!([{ "text": "{\"recipeNames\":[\"Tomato Soup\"]}" }])),
    )
    .await;

    let schema = json!({
        "type": "object",
        "properties": { "recipeNames": { "type": "array", "items": { "type": "string" } } },
        "required": ["recipeNames"]
    });

    let response = model(base_url)
        .generate(LanguageModelInput {
            system_prompt: Some("You suggest recipes.".to_string()),
            messages: vec![Message::user(vec![Part::text("tomatoes, basil")])],
            response_format: Some(ResponseFormatOption::Json(ResponseFormatJson {
                name: "recipe_names".to_string(),
                description: None,
                schema: Some(schema.clone()),
            })),
            temperature: Some(0.4),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        ModelResponse {
            content: vec![Part::text("{\"recipeNames\":[\"Tomato Soup\"]}")],
            usage: Some(ModelUsage {
                input_tokens: 12,
                output_tokens: 7,
            }),
        }
    );

    let requests = recorded.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/models/gemini-test:generateContent");
    assert_eq!(requests[0].api_key.as_deref(), Some("test-key"));
    assert_eq!(
        requests[0].body,
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": "tomatoes, basil" }] }],
            "systemInstruction": { "role": "system", "parts": [{ "text": "You suggest recipes." }] },
            "generationConfig": {
                "temperature": 0.4,
                "responseMimeType": "application/json",
                "responseJsonSchema": schema,
            }
        })
    );
}

#[tokio::test]
async fn generate_requests_and_maps_inline_images() {
    let (base_url, recorded) = spawn_gemini(
        StatusCode::OK,
        candidate(&json!([
            { "text": "thinking about plating", "thought": true },
            { "text": "Here is your dish." },
            { "inlineData": { "mimeType": "image/png", "data": "aW1hZ2U=" } },
            { "inlineData": { "mimeType": "audio/wav", "data": "c291bmQ=" } }
        ])),
    )
    .await;

    let response = model(base_url)
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text("Draw a tomato soup")])],
            modalities: Some(vec![Modality::Text, Modality::Image]),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        response.content,
        vec![
            Part::text("Here is your dish."),
            Part::image("aW1hZ2U=", "image/png"),
        ]
    );
    assert_eq!(
        response.first_image().unwrap().to_data_uri().unwrap(),
        "data:image/png;base64,aW1hZ2U="
    );

    let requests = recorded.lock().unwrap().clone();
    assert_eq!(
        requests[0].body["generationConfig"]["responseModalities"],
        json!(["TEXT", "IMAGE"])
    );
}

#[tokio::test]
async fn generate_reports_blocked_prompt_as_refusal() {
    let (base_url, _) = spawn_gemini(
        StatusCode::OK,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;

    let error = model(base_url)
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text("something unsafe")])],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(
        matches!(&error, LanguageModelError::Refusal(message) if message.contains("SAFETY")),
        "{error:?}"
    );
}

#[tokio::test]
async fn generate_reports_safety_finish_without_parts_as_refusal() {
    let (base_url, _) = spawn_gemini(
        StatusCode::OK,
        json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
    )
    .await;

    let error = model(base_url)
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text("Draw it")])],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(error, LanguageModelError::Refusal(_)), "{error:?}");
}

#[tokio::test]
async fn generate_without_candidates_is_an_invariant_error() {
    let (base_url, _) = spawn_gemini(StatusCode::OK, json!({ "candidates": [] })).await;

    let error = model(base_url)
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text("Hello")])],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(
        matches!(error, LanguageModelError::Invariant("google", _)),
        "{error:?}"
    );
}

#[tokio::test]
async fn generate_reports_failed_status() {
    let (base_url, _) = spawn_gemini(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "code": 429, "message": "Resource exhausted" } }),
    )
    .await;

    let error = model(base_url)
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text("Hello")])],
            ..Default::default()
        })
        .await
        .unwrap_err();

    match error {
        LanguageModelError::StatusCode(status, body) => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert!(body.contains("Resource exhausted"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn generate_rejects_invalid_api_key_header() {
    let error = GoogleModel::new(
        "gemini-test",
        GoogleModelOptions {
            api_key: "bad\nkey".to_string(),
            base_url: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        },
    )
    .generate(LanguageModelInput::default())
    .await
    .unwrap_err();

    assert!(
        matches!(error, LanguageModelError::InvalidInput(_)),
        "{error:?}"
    );
}

#[tokio::test]
#[ignore = "calls the live Gemini API; needs GOOGLE_API_KEY"]
async fn live_generate_returns_text() {
    dotenvy::dotenv().ok();
    let api_key = env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY must be set");

    let response = GoogleModel::new(
        "gemini-2.0-flash",
        GoogleModelOptions {
            api_key,
            ..Default::default()
        },
    )
    .generate(LanguageModelInput {
        messages: vec![Message::user(vec![Part::text("Name one pasta dish.")])],
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(response.text().is_some_and(|text| !text.trim().is_empty()));
}

//! Chat client against a mock completions endpoint

use crate::integration::mock_server::MockServerFixture;
use ai_lib_openai::chat::{ChatClient, DEFAULT_CHAT_MODEL};
use ai_lib_openai::types::{
    CompletionParams, Content, Message, MultiModalCompletionParams, MultiModalMessage, Role,
};
use ai_lib_openai::Error;
use serde_json::json;

const PATH: &str = "/v1/chat/completions";

fn completion_body() -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "gpt-3.5-turbo-0613",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Hello! How can I help you today?"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
    })
}

async fn client(fixture: &MockServerFixture, model: &str) -> ChatClient {
    ChatClient::builder()
        .transport(fixture.transport())
        .model(model)
        .completions_endpoint(fixture.url(PATH))
        .build()
        .expect("build chat client")
}

#[tokio::test]
async fn test_completion_round_trip() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(
            PATH,
            json!({
                "model": DEFAULT_CHAT_MODEL,
                "messages": [{"role": "user", "content": "Hello"}],
                "temperature": 0.5
            }),
            completion_body(),
        )
        .await;

    let chat = client(&fixture, "").await;
    let params = CompletionParams::new(vec![Message::user("Hello")]).with_temperature(0.5);
    let resp = chat
        .create_completion(params)
        .await
        .expect("completion");

    mock.assert_async().await;
    assert_eq!(resp.id, "chatcmpl-123");
    assert_eq!(resp.object, "chat.completion");
    assert_eq!(resp.created, 1677652288);
    assert_eq!(resp.choices.len(), 1);
    let message = resp.choices[0].message.as_ref().expect("message");
    assert_eq!(message.role, Role::Assistant);
    assert_eq!(resp.choices[0].finish_reason.as_deref(), Some("stop"));
    assert_eq!(resp.first_content(), Some("Hello! How can I help you today?"));
    assert_eq!(resp.usage.map(|u| u.total_tokens), Some(21));
}

#[tokio::test]
async fn test_mm_completion_sends_data_url() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(
            PATH,
            json!({
                "model": "gpt-4-vision-preview",
                "max_tokens": 255,
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "image_url", "image_url": {"url": "data:image/png;base64,AQID"}},
                        {"type": "text", "text": "please describe the image"}
                    ]
                }]
            }),
            completion_body(),
        )
        .await;

    let chat = client(&fixture, "gpt-4-vision-preview").await;
    let image = Content::from_image("image/png", &[1, 2, 3]).expect("image content");
    let resp = chat
        .create_mm_completion(
            MultiModalCompletionParams::new(vec![MultiModalMessage::user(vec![
                image,
                Content::from_text("please describe the image"),
            ])])
            .with_max_tokens(255),
        )
        .await
        .expect("mm completion");

    mock.assert_async().await;
    assert_eq!(resp.choices.len(), 1);
}

#[tokio::test]
async fn test_streaming_never_reaches_server() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable(PATH).await;

    let chat = client(&fixture, "").await;
    let err = chat
        .create_completion(CompletionParams {
            stream: true,
            ..CompletionParams::new(vec![Message::user("Hello")])
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unsupported { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_error_envelope() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            PATH,
            401,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#,
        )
        .await;

    let chat = client(&fixture, "").await;
    let err = chat
        .create_completion(CompletionParams::new(vec![Message::user("Hello")]))
        .await
        .unwrap_err();

    match err {
        Error::Remote {
            status,
            kind,
            code,
            message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(kind.as_deref(), Some("invalid_request_error"));
            assert_eq!(code.as_deref(), Some("invalid_api_key"));
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .create_async()
        .await;

    let chat = client(&fixture, "").await;
    let err = chat
        .create_completion(CompletionParams::new(vec![Message::user("Hello")]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

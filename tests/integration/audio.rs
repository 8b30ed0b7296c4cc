//! Audio client against mock transcription and speech endpoints

use crate::integration::mock_server::{MockServerFixture, API_KEY};
use ai_lib_openai::audio::{AudioClient, SpeechFormat, SpeechParams, TranscriptionParams};
use ai_lib_openai::Error;
use mockito::Matcher;
use serde_json::json;
use std::error::Error as _;

const TRANSCRIPTION_PATH: &str = "/v1/audio/transcriptions";
const SPEECH_PATH: &str = "/v1/audio/speech";

fn client(fixture: &MockServerFixture) -> AudioClient {
    AudioClient::builder()
        .transport(fixture.transport())
        .transcription_endpoint(fixture.url(TRANSCRIPTION_PATH))
        .speech_endpoint(fixture.url(SPEECH_PATH))
        .build()
        .expect("build audio client")
}

#[tokio::test]
async fn test_transcription_multipart_upload() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", TRANSCRIPTION_PATH)
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="model"\r\n\r\nwhisper-1\r\n"#.to_string()),
            Matcher::Regex(r#"name="language"\r\n\r\nen\r\n"#.to_string()),
            Matcher::Regex(r#"name="file"; filename="file\.mp3""#.to_string()),
            Matcher::Regex("ID3fake-audio".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"text": "Imagine the wildest idea"}).to_string())
        .create_async()
        .await;

    let audio = client(&fixture);
    let resp = audio
        .create_transcription(
            TranscriptionParams::from_bytes(b"ID3fake-audio".to_vec(), "mp3").with_language("en"),
        )
        .await
        .expect("transcription");

    mock.assert_async().await;
    assert_eq!(resp.text, "Imagine the wildest idea");
}

#[tokio::test]
async fn test_transcription_without_format_sends_nothing() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable(TRANSCRIPTION_PATH).await;

    let err = client(&fixture)
        .create_transcription(TranscriptionParams::from_bytes(vec![1, 2, 3], ""))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_speech_streams_audio_bytes() {
    let mut fixture = MockServerFixture::new().await;
    let audio_bytes: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let mock = fixture
        .server
        .mock("POST", SPEECH_PATH)
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_body(Matcher::Json(json!({
            "model": "tts-1",
            "input": "Imagine the wildest idea",
            "voice": "nova",
            "response_format": "aac"
        })))
        .with_status(200)
        .with_header("content-type", "audio/aac")
        .with_body(&audio_bytes)
        .create_async()
        .await;

    let mut sink = Vec::new();
    let written = client(&fixture)
        .create_speech(
            SpeechParams::new("Imagine the wildest idea", "nova")
                .with_model("tts-1")
                .with_response_format(SpeechFormat::Aac),
            &mut sink,
        )
        .await
        .expect("speech");

    mock.assert_async().await;
    assert_eq!(written, audio_bytes.len() as u64);
    assert_eq!(sink, audio_bytes);
}

#[tokio::test]
async fn test_speech_without_voice_sends_nothing() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable(SPEECH_PATH).await;

    let mut sink = Vec::new();
    let err = client(&fixture)
        .create_speech(SpeechParams::new("hello", ""), &mut sink)
        .await
        .unwrap_err();

    assert!(err.is_validation());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_speech_failure_is_wrapped() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            SPEECH_PATH,
            500,
            r#"{"error":{"message":"The server had an error","type":"server_error","code":null}}"#,
        )
        .await;

    let mut sink = Vec::new();
    let err = client(&fixture)
        .create_speech(SpeechParams::new("hello", "nova"), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SpeechDownload { .. }));
    assert_eq!(
        err.to_string(),
        "failed to download speech: Remote error: HTTP 500 (server_error): The server had an error"
    );
    assert_eq!(err.status(), Some(500));
    assert!(err.source().is_some());
    assert!(sink.is_empty());
}

//! Transcribe an audio file, then read the transcript back as speech.
//!
//! Environment:
//! - OPENAI_API_KEY: provider key
//! - AUDIO_FILE_PATH: mp3 file to transcribe
//!
//! Usage:
//!   OPENAI_API_KEY=... AUDIO_FILE_PATH=talk.mp3 cargo run --example audio

use std::sync::Arc;

use ai_lib_openai::audio::{AudioClient, SpeechFormat, SpeechParams, TranscriptionParams};
use ai_lib_openai::HttpTransport;
use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::var("AUDIO_FILE_PATH").context("must provide an AUDIO_FILE_PATH env var")?;
    let file = tokio::fs::File::open(&path)
        .await
        .with_context(|| format!("error opening audio file {path}"))?;

    let session = Arc::new(HttpTransport::from_env()?);
    let client = AudioClient::new(session, "");

    let resp = client
        .create_transcription(TranscriptionParams::new(file, "mp3").with_language("en"))
        .await
        .context("error transcribing file")?;
    info!(text = %resp.text, "transcribed");
    println!("{}", resp.text);

    let mut out = tokio::fs::File::create("speech.aac")
        .await
        .context("error opening speech file")?;
    let written = client
        .create_speech(
            SpeechParams::new(resp.text, "nova")
                .with_model("tts-1")
                .with_response_format(SpeechFormat::Aac),
            &mut out,
        )
        .await
        .context("error creating speech")?;

    println!("saved {written} bytes of speech to speech.aac");
    Ok(())
}

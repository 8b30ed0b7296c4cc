//! Audio module: speech-to-text (Whisper) through multipart upload and
//! text-to-speech through a streamed download.

mod client;
mod types;

pub use client::{
    AudioClient, AudioClientBuilder, AudioConfig, DEFAULT_AUDIO_MODEL, DEFAULT_SPEECH_ENDPOINT,
    DEFAULT_TRANSCRIPTION_ENDPOINT,
};
pub use types::{SpeechFormat, SpeechParams, TranscriptionParams, TranscriptionResponse};

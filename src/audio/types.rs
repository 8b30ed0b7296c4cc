//! Transcription and speech types.

use crate::transport::ByteStream;
use crate::{Error, ErrorContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;
use tokio::io::AsyncRead;

/// Parameters of a transcription request.
///
/// `audio` is streamed to the provider as the file part of a multipart form.
pub struct TranscriptionParams {
    pub model: String,
    pub language: Option<String>,
    pub audio: ByteStream,
    /// Container format tag such as "mp3" or "wav". Required.
    pub audio_format: String,
    pub prompt: Option<String>,
    pub temperature: Option<f32>,
}

impl TranscriptionParams {
    pub fn new(
        audio: impl AsyncRead + Send + Sync + Unpin + 'static,
        audio_format: impl Into<String>,
    ) -> Self {
        Self {
            model: String::new(),
            language: None,
            audio: Box::new(audio),
            audio_format: audio_format.into(),
            prompt: None,
            temperature: None,
        }
    }

    /// Transcribe an in-memory buffer.
    pub fn from_bytes(audio: impl Into<Vec<u8>>, audio_format: impl Into<String>) -> Self {
        Self::new(Cursor::new(audio.into()), audio_format)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Form fields sent alongside the file. Unset and empty values are skipped.
    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("model".to_string(), self.model.clone())];
        if let Some(language) = self.language.as_ref().filter(|l| !l.is_empty()) {
            fields.push(("language".to_string(), language.clone()));
        }
        if let Some(prompt) = self.prompt.as_ref().filter(|p| !p.is_empty()) {
            fields.push(("prompt".to_string(), prompt.clone()));
        }
        if let Some(temperature) = self.temperature {
            fields.push(("temperature".to_string(), temperature.to_string()));
        }
        fields
    }
}

impl fmt::Debug for TranscriptionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionParams")
            .field("model", &self.model)
            .field("language", &self.language)
            .field("audio_format", &self.audio_format)
            .field("prompt", &self.prompt)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    #[serde(default)]
    pub text: String,
}

/// Output formats supported by speech synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechFormat {
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl SpeechFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }
}

impl FromStr for SpeechFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "opus" => Ok(Self::Opus),
            "aac" => Ok(Self::Aac),
            "flac" => Ok(Self::Flac),
            "wav" => Ok(Self::Wav),
            "pcm" => Ok(Self::Pcm),
            other => Err(Error::validation_with_context(
                format!("unknown speech format {:?}", other),
                ErrorContext::new().with_field_path("params.response_format"),
            )),
        }
    }
}

/// Parameters of a speech synthesis request, sent as the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechParams {
    pub model: String,
    pub input: String,
    /// Voice identifier such as "alloy" or "nova". Required.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub voice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<SpeechFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl SpeechParams {
    pub fn new(input: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            voice: voice.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_response_format(mut self, format: SpeechFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

//! Audio client: Whisper transcription and text-to-speech.

use std::sync::Arc;

use super::types::{SpeechParams, TranscriptionParams, TranscriptionResponse};
use crate::transport::{HttpTransport, Transport, UploadFile};
use crate::utils::{fill_default_model, validate_endpoint};
use crate::{Error, ErrorContext, Result};
use tokio::io::AsyncWrite;

pub const DEFAULT_AUDIO_MODEL: &str = "whisper-1";
pub const DEFAULT_TRANSCRIPTION_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";
pub const DEFAULT_SPEECH_ENDPOINT: &str = "https://api.openai.com/v1/audio/speech";

/// Endpoint configuration, fixed when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    pub transcription_endpoint: String,
    pub speech_endpoint: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            transcription_endpoint: DEFAULT_TRANSCRIPTION_ENDPOINT.to_string(),
            speech_endpoint: DEFAULT_SPEECH_ENDPOINT.to_string(),
        }
    }
}

/// Client for speech-to-text and text-to-speech.
#[derive(Clone)]
pub struct AudioClient {
    transport: Arc<dyn Transport>,
    model: String,
    config: AudioConfig,
}

impl AudioClient {
    /// Client with the default endpoints. An empty `model` selects `whisper-1`.
    pub fn new(transport: Arc<dyn Transport>, model: impl Into<String>) -> Self {
        Self::from_parts(transport, model, AudioConfig::default())
    }

    /// Client with custom endpoints. Both endpoints must be http(s) URLs.
    pub fn with_config(
        transport: Arc<dyn Transport>,
        model: impl Into<String>,
        config: AudioConfig,
    ) -> Result<Self> {
        let config = AudioConfig {
            transcription_endpoint: validate_endpoint(
                "transcription_endpoint",
                config.transcription_endpoint,
            )?,
            speech_endpoint: validate_endpoint("speech_endpoint", config.speech_endpoint)?,
        };
        Ok(Self::from_parts(transport, model, config))
    }

    fn from_parts(
        transport: Arc<dyn Transport>,
        model: impl Into<String>,
        config: AudioConfig,
    ) -> Self {
        let mut model = model.into();
        fill_default_model(&mut model, DEFAULT_AUDIO_MODEL);
        Self {
            transport,
            model,
            config,
        }
    }

    pub fn builder() -> AudioClientBuilder {
        AudioClientBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Transcribe the audio stream in `params`.
    pub async fn create_transcription(
        &self,
        mut params: TranscriptionParams,
    ) -> Result<TranscriptionResponse> {
        if params.audio_format.is_empty() {
            return Err(Error::validation_with_context(
                "audio format is required",
                ErrorContext::new()
                    .with_field_path("params.audio_format")
                    .with_source("audio"),
            ));
        }
        fill_default_model(&mut params.model, &self.model);

        let fields = params.form_fields();
        let file = UploadFile::new(params.audio, params.audio_format);
        let value = self
            .transport
            .upload(&self.config.transcription_endpoint, file, fields)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Synthesize speech and stream the audio into `sink`.
    ///
    /// Returns the number of bytes written. Transport failures come back as
    /// [`Error::SpeechDownload`] wrapping the cause.
    pub async fn create_speech<W>(&self, mut params: SpeechParams, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Send + Unpin,
    {
        if params.voice.is_empty() {
            return Err(Error::validation_with_context(
                "voice is required",
                ErrorContext::new()
                    .with_field_path("params.voice")
                    .with_source("audio"),
            ));
        }
        fill_default_model(&mut params.model, &self.model);

        let body = serde_json::to_value(&params)?;
        self.transport
            .download(&self.config.speech_endpoint, body, sink)
            .await
            .map_err(Error::speech_download)
    }
}

pub struct AudioClientBuilder {
    model: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    transcription_endpoint: Option<String>,
    speech_endpoint: Option<String>,
}

impl AudioClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            transport: None,
            transcription_endpoint: None,
            speech_endpoint: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Share an existing session. Without one, `build` creates an
    /// [`HttpTransport`] from the environment.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn transcription_endpoint(mut self, url: impl Into<String>) -> Self {
        self.transcription_endpoint = Some(url.into());
        self
    }

    pub fn speech_endpoint(mut self, url: impl Into<String>) -> Self {
        self.speech_endpoint = Some(url.into());
        self
    }

    pub fn build(self) -> Result<AudioClient> {
        let defaults = AudioConfig::default();
        let config = AudioConfig {
            transcription_endpoint: self
                .transcription_endpoint
                .unwrap_or(defaults.transcription_endpoint),
            speech_endpoint: self.speech_endpoint.unwrap_or(defaults.speech_endpoint),
        };
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::from_env()?),
        };
        AudioClient::with_config(transport, self.model.unwrap_or_default(), config)
    }
}

impl Default for AudioClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

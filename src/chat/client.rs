//! Chat completions client.

use std::sync::Arc;

use crate::transport::{send_json, HttpTransport, Transport};
use crate::types::{CompletionParams, CompletionResponse, MultiModalCompletionParams};
use crate::utils::{fill_default_model, validate_endpoint};
use crate::{Error, Result};

pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_COMPLETIONS_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Endpoint configuration, fixed when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub completions_endpoint: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            completions_endpoint: DEFAULT_COMPLETIONS_ENDPOINT.to_string(),
        }
    }
}

/// Client for non-streaming chat and vision completions.
#[derive(Clone)]
pub struct ChatClient {
    transport: Arc<dyn Transport>,
    model: String,
    config: ChatConfig,
}

impl ChatClient {
    /// Client with the default endpoint. An empty `model` selects `gpt-3.5-turbo`.
    pub fn new(transport: Arc<dyn Transport>, model: impl Into<String>) -> Self {
        Self::from_parts(transport, model, ChatConfig::default())
    }

    /// Client with custom endpoints. The endpoint must be an http(s) URL.
    pub fn with_config(
        transport: Arc<dyn Transport>,
        model: impl Into<String>,
        config: ChatConfig,
    ) -> Result<Self> {
        let config = ChatConfig {
            completions_endpoint: validate_endpoint(
                "completions_endpoint",
                config.completions_endpoint,
            )?,
        };
        Ok(Self::from_parts(transport, model, config))
    }

    fn from_parts(
        transport: Arc<dyn Transport>,
        model: impl Into<String>,
        config: ChatConfig,
    ) -> Self {
        let mut model = model.into();
        fill_default_model(&mut model, DEFAULT_CHAT_MODEL);
        Self {
            transport,
            model,
            config,
        }
    }

    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Create a chat completion.
    ///
    /// Fails with [`Error::Unsupported`] without sending anything when
    /// `params.stream` is set.
    pub async fn create_completion(
        &self,
        mut params: CompletionParams,
    ) -> Result<CompletionResponse> {
        fill_default_model(&mut params.model, &self.model);
        reject_streaming(params.stream)?;
        send_json(
            self.transport.as_ref(),
            &self.config.completions_endpoint,
            &params,
        )
        .await
    }

    /// Multi-modal version of [`create_completion`](Self::create_completion).
    pub async fn create_mm_completion(
        &self,
        mut params: MultiModalCompletionParams,
    ) -> Result<CompletionResponse> {
        fill_default_model(&mut params.model, &self.model);
        reject_streaming(params.stream)?;
        send_json(
            self.transport.as_ref(),
            &self.config.completions_endpoint,
            &params,
        )
        .await
    }
}

fn reject_streaming(stream: bool) -> Result<()> {
    if stream {
        return Err(Error::unsupported(
            "streaming completions are not handled by ChatClient; use a streaming client instead",
        ));
    }
    Ok(())
}

pub struct ChatClientBuilder {
    model: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    completions_endpoint: Option<String>,
}

impl ChatClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            transport: None,
            completions_endpoint: None,
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

    pub fn completions_endpoint(mut self, url: impl Into<String>) -> Self {
        self.completions_endpoint = Some(url.into());
        self
    }

    pub fn build(self) -> Result<ChatClient> {
        let config = ChatConfig {
            completions_endpoint: self
                .completions_endpoint
                .unwrap_or_else(|| DEFAULT_COMPLETIONS_ENDPOINT.to_string()),
        };
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::from_env()?),
        };
        ChatClient::with_config(transport, self.model.unwrap_or_default(), config)
    }
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

use super::{Transport, UploadFile};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use keyring::Entry;
use reqwest::multipart::{Form, Part};
use reqwest::{Proxy, RequestBuilder, Response};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const KEYRING_SERVICE: &str = "ai-protocol";
const KEYRING_USER: &str = "openai";

/// HTTP session backed by a pooled `reqwest` client.
///
/// Every request carries `Authorization: Bearer <key>` and, if configured,
/// the `OpenAI-Organization` header.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    organization: Option<String>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("organization", &self.organization)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Build a session from the environment (keyring, `OPENAI_API_KEY`, ...).
    pub fn from_env() -> Result<Self> {
        HttpTransportBuilder::new().build()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    async fn execute(&self, request: RequestBuilder, endpoint: &str) -> Result<Response> {
        let mut request = request.bearer_auth(&self.api_key);
        if let Some(org) = &self.organization {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request.send().await.map_err(TransportError::Http)?;
        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "provider responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_err(TransportError::Http)?;
        Err(remote_error(status.as_u16(), &body))
    }

    async fn read_json(response: Response) -> Result<serde_json::Value> {
        let bytes = response.bytes().await.map_err(TransportError::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn make_request(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value> {
        debug!(endpoint, "sending json request");
        let response = self
            .execute(self.client.post(endpoint).json(&body), endpoint)
            .await?;
        Self::read_json(response).await
    }

    async fn upload(
        &self,
        endpoint: &str,
        file: UploadFile,
        fields: Vec<(String, String)>,
    ) -> Result<serde_json::Value> {
        let file_name = file.file_name();
        debug!(endpoint, file_name = %file_name, "sending multipart upload");

        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file.stream));
        form = form.part("file", Part::stream(body).file_name(file_name));

        let response = self
            .execute(self.client.post(endpoint).multipart(form), endpoint)
            .await?;
        Self::read_json(response).await
    }

    async fn download(
        &self,
        endpoint: &str,
        body: serde_json::Value,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64> {
        debug!(endpoint, "sending download request");
        let mut response = self
            .execute(self.client.post(endpoint).json(&body), endpoint)
            .await?;

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(TransportError::Http)? {
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        debug!(endpoint, bytes = written, "download complete");
        Ok(written)
    }
}

/// Builder for [`HttpTransport`].
///
/// Anything left unset is read from the environment:
/// - API key: OS keyring (`ai-protocol` / `openai`), then `OPENAI_API_KEY`
/// - organization: `OPENAI_ORG_ID`
/// - timeout: `AI_HTTP_TIMEOUT_SECS` (default 60)
/// - proxy: `AI_PROXY_URL`
pub struct HttpTransportBuilder {
    api_key: Option<String>,
    organization: Option<String>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            organization: None,
            timeout: None,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let api_key = self
            .api_key
            .or_else(keyring_api_key)
            .or_else(|| env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key required",
                    ErrorContext::new()
                        .with_details("set OPENAI_API_KEY or pass api_key()")
                        .with_source("http_transport"),
                )
            })?;
        let organization = self
            .organization
            .or_else(|| env::var("OPENAI_ORG_ID").ok())
            .filter(|o| !o.is_empty());

        let timeout = self.timeout.unwrap_or_else(|| {
            Duration::from_secs(
                env::var("AI_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            )
        });

        let mut builder = reqwest::Client::builder().timeout(timeout);
        if let Ok(proxy_url) = env::var("AI_PROXY_URL") {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy: {}", e),
                    ErrorContext::new().with_field_path("AI_PROXY_URL"),
                )
            })?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpTransport {
            client,
            api_key,
            organization,
        })
    }
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn keyring_api_key() -> Option<String> {
    Entry::new(KEYRING_SERVICE, KEYRING_USER)
        .ok()
        .and_then(|entry| entry.get_password().ok())
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Decode the provider's `{"error": {...}}` envelope, falling back to the raw body.
fn remote_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(ApiErrorEnvelope { error }) => Error::Remote {
            status,
            kind: error.kind,
            code: error.code.and_then(|c| match c {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            }),
            message: error.message,
        },
        Err(_) => Error::Remote {
            status,
            kind: None,
            code: None,
            message: body.trim().to_string(),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

//! Transport layer: the session contract the clients delegate all I/O to.
//!
//! Clients never touch HTTP directly. They hand a JSON body (or a multipart
//! upload) to a [`Transport`] and get decoded JSON or raw bytes back. The
//! default implementation is [`HttpTransport`]; tests substitute their own.

mod http;


pub use http::{HttpTransport, HttpTransportBuilder, TransportError};

use crate::Result;
use async_trait::async_trait;
use std::fmt;
use tokio::io::{AsyncRead, AsyncWrite};

/// Readable byte source streamed as the file part of an upload.
pub type ByteStream = Box<dyn AsyncRead + Send + Sync + Unpin>;

/// A file payload for a multipart upload.
pub struct UploadFile {
    pub stream: ByteStream,
    /// File extension, also the provider's format tag (e.g. "mp3").
    pub extension: String,
}

impl UploadFile {
    pub fn new(stream: ByteStream, extension: impl Into<String>) -> Self {
        Self {
            stream,
            extension: extension.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("file.{}", self.extension)
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

/// Session contract shared by every client.
///
/// Implementations own authentication, connection reuse and status handling.
/// A single attempt is made per call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `endpoint` and return the decoded JSON response.
    async fn make_request(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value>;

    /// POST a multipart form made of `fields` followed by `file`, returning
    /// the decoded JSON response.
    async fn upload(
        &self,
        endpoint: &str,
        file: UploadFile,
        fields: Vec<(String, String)>,
    ) -> Result<serde_json::Value>;

    /// POST `body` as JSON and stream the raw response bytes into `sink`.
    /// Returns the number of bytes written.
    async fn download(
        &self,
        endpoint: &str,
        body: serde_json::Value,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64>;
}

/// Typed wrapper over [`Transport::make_request`].
#[cfg(any(feature = "chat", feature = "audio"))]
pub(crate) async fn send_json<Req, Resp>(
    transport: &dyn Transport,
    endpoint: &str,
    request: &Req,
) -> Result<Resp>
where
    Req: serde::Serialize + Sync + ?Sized,
    Resp: serde::de::DeserializeOwned,
{
    let body = serde_json::to_value(request)?;
    let value = transport.make_request(endpoint, body).await?;
    Ok(serde_json::from_value(value)?)
}

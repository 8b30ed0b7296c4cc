//! # ai-lib-openai
//!
//! Thin typed clients for the OpenAI HTTP API: chat completions, multi-modal
//! (vision) completions, Whisper transcription and text-to-speech.
//!
//! ## Overview
//!
//! Each client turns a parameter struct into one HTTP exchange and hands back
//! a typed result. There is no retry, caching or streaming logic here; all
//! I/O goes through a [`Transport`] session, by default [`HttpTransport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ai_lib_openai::chat::ChatClient;
//! use ai_lib_openai::types::{CompletionParams, Message};
//! use ai_lib_openai::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() -> ai_lib_openai::Result<()> {
//!     let session = Arc::new(HttpTransport::builder().api_key("sk-...").build()?);
//!     let client = ChatClient::new(session, "gpt-4o-mini");
//!
//!     let resp = client
//!         .create_completion(CompletionParams::new(vec![Message::user("Hello!")]))
//!         .await?;
//!     println!("{}", resp.first_content().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chat`] | Chat and vision completions |
//! | [`audio`] | Transcription and speech synthesis |
//! | [`types`] | Messages, content blocks, completion params/responses |
//! | [`transport`] | Session contract and the `reqwest` implementation |

#[cfg(feature = "audio")]
pub mod audio;
#[cfg(feature = "chat")]
pub mod chat;
pub mod transport;
pub mod types;

#[cfg(any(feature = "chat", feature = "audio"))]
mod utils;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};

pub use transport::{HttpTransport, HttpTransportBuilder, Transport};

#[cfg(feature = "audio")]
pub use audio::AudioClient;
#[cfg(feature = "chat")]
pub use chat::ChatClient;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

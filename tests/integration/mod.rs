//! Integration tests with mock HTTP server

pub mod mock_server;

#[cfg(feature = "audio")]
pub mod audio;
#[cfg(feature = "chat")]
pub mod chat;

//! Chat module: text and multi-modal (vision) completions.

mod client;

pub use client::{
    ChatClient, ChatClientBuilder, ChatConfig, DEFAULT_CHAT_MODEL, DEFAULT_COMPLETIONS_ENDPOINT,
};

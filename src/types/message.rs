//! Chat messages and multi-modal content blocks.

use crate::{Error, ErrorContext, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::function::FunctionCall;

/// Message role
///
/// Roles this crate does not name (e.g. "tool" or "developer" from
/// compatible backends) are kept verbatim in [`Role::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Function,
    #[serde(untagged)]
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Function => "function",
            Role::Other(role) => role,
        }
    }
}

/// A text-only chat message, optionally carrying a function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            function_call: None,
            name: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Result of a function call, fed back to the model under the function's name.
    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Role::Function, content).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

/// A chat message made of ordered content blocks (text and images).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiModalMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Content>,
}

impl MultiModalMessage {
    pub fn new(role: Role, content: Vec<Content>) -> Self {
        Self { role, content }
    }

    pub fn user(content: Vec<Content>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn contains_image(&self) -> bool {
        self.content
            .iter()
            .any(|c| matches!(c, Content::ImageUrl { .. }))
    }
}

/// How closely the model should look at an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    High,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

/// Content block of a multi-modal message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl Content {
    pub fn from_text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn from_image_url(url: impl Into<String>) -> Self {
        Content::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }

    /// Inline raw image bytes as a `data:<media_type>;base64,...` URL.
    ///
    /// Uses the standard base64 alphabet with padding, matching the provider's
    /// vision upload reference.
    pub fn from_image(media_type: &str, data: &[u8]) -> Result<Self> {
        if !media_type.starts_with("image/") {
            return Err(Error::validation_with_context(
                "media type must be image/*",
                ErrorContext::new()
                    .with_field_path("content.media_type")
                    .with_details(format!("got {:?}", media_type))
                    .with_source("chat"),
            ));
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        let mut url = String::with_capacity(media_type.len() + encoded.len() + 13);
        url.push_str("data:");
        url.push_str(media_type);
        url.push_str(";base64,");
        url.push_str(&encoded);
        Ok(Self::from_image_url(url))
    }

    /// Read an image file and inline it, guessing the media type from the extension.
    pub fn from_image_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = guess_image_media_type(path).ok_or_else(|| {
            Error::validation_with_context(
                "cannot infer image media type from file extension",
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("chat"),
            )
        })?;
        let bytes = std::fs::read(path)?;
        Self::from_image(media_type, &bytes)
    }

    /// Set the detail hint on an image block. Text blocks are returned unchanged.
    pub fn with_detail(self, detail: ImageDetail) -> Self {
        match self {
            Content::ImageUrl { image_url } => Content::ImageUrl {
                image_url: ImageUrl {
                    detail: Some(detail),
                    ..image_url
                },
            },
            text => text,
        }
    }
}

fn guess_image_media_type(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mt = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => return None,
    };
    Some(mt)
}

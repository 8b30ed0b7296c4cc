//! Typed request/response model for the chat endpoints.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Text chat message, optionally carrying a function call |
//! | [`MultiModalMessage`] | Chat message made of [`Content`] blocks |
//! | [`Content`] | Text or image block |
//! | [`CompletionParams`] | Text completion request |
//! | [`MultiModalCompletionParams`] | Vision completion request |
//! | [`CompletionResponse`] | Completion result with [`Choice`]s and [`Usage`] |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_openai::types::{Content, MultiModalCompletionParams, MultiModalMessage};
//!
//! let image = Content::from_image("image/png", &[0x89, 0x50, 0x4e, 0x47]).unwrap();
//! let params = MultiModalCompletionParams::new(vec![MultiModalMessage::user(vec![
//!     image,
//!     Content::from_text("please describe the image"),
//! ])])
//! .with_max_tokens(255);
//! assert!(params.messages[0].contains_image());
//! ```

pub mod completion;
pub mod function;
pub mod message;

pub use completion::{
    Choice, CompletionParams, CompletionResponse, MultiModalCompletionParams, Usage,
};
pub use function::{Function, FunctionCall, FunctionCallDirective};
pub use message::{Content, ImageDetail, ImageUrl, Message, MultiModalMessage, Role};

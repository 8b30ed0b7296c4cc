//! Ask a vision model to describe an image.
//!
//! Environment:
//! - OPENAI_API_KEY: provider key
//! - IMAGE_FILE_PATH: png/jpeg/gif/webp image
//!
//! Usage:
//!   OPENAI_API_KEY=... IMAGE_FILE_PATH=image.png cargo run --example vision

use ai_lib_openai::chat::ChatClient;
use ai_lib_openai::types::{Content, MultiModalCompletionParams, MultiModalMessage};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::var("IMAGE_FILE_PATH").context("must provide an IMAGE_FILE_PATH env var")?;
    let image = Content::from_image_file(&path).context("failed to create image content")?;

    let client = ChatClient::builder().model("gpt-4-vision-preview").build()?;
    let resp = client
        .create_mm_completion(
            MultiModalCompletionParams::new(vec![MultiModalMessage::user(vec![
                image,
                Content::from_text("please describe the image"),
            ])])
            .with_max_tokens(255),
        )
        .await
        .context("failed to complete")?;

    for choice in &resp.choices {
        if let Some(msg) = &choice.message {
            println!("role={:?}, content={:?}", msg.role, msg.content);
        }
    }
    Ok(())
}

// src/llm/mod.rs
// Text-generation and image-generation seams, plus the OpenAI client that backs them

use async_trait::async_trait;

pub mod openai;

pub use openai::OpenAIClient;

/// Produces the raw assistant text for a system prompt + user message pair
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> anyhow::Result<String>;
}

/// Produces a single image for a prompt and returns where it can be fetched
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> anyhow::Result<String>;
}

// src/services/mod.rs
// Speech synthesis seam and the ElevenLabs client behind it

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

pub mod elevenlabs;

pub use elevenlabs::ElevenLabsClient;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and write the audio to `output`
    async fn text_to_speech(&self, text: &str, output: &Path) -> anyhow::Result<()>;

    /// The provider's voice catalog, passed through untouched
    async fn voices(&self) -> anyhow::Result<Value>;
}

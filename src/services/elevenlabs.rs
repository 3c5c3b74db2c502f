// src/services/elevenlabs.rs

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

use super::SpeechSynthesizer;
use crate::config::CompanionConfig;
use crate::core::ops::file::stream_response_to_path;

pub struct ElevenLabsClient {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    voice_id: String,
    model_id: String,
}

#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

impl ElevenLabsClient {
    pub fn from_config(client: Client, config: &CompanionConfig) -> Self {
        Self {
            client,
            api_key: config.elevenlabs_api_key.clone(),
            api_base: config.elevenlabs_base_url.trim_end_matches('/').to_string(),
            voice_id: config.elevenlabs_voice_id.clone(),
            model_id: config.elevenlabs_model_id.clone(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("xi-api-key", key),
            None => request,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn text_to_speech(&self, text: &str, output: &Path) -> Result<()> {
        let url = format!("{}/text-to-speech/{}", self.api_base, self.voice_id);
        let body = TextToSpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings::default(),
        };

        let resp = self
            .authorized(self.client.post(&url))
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .context("ElevenLabs text-to-speech request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(anyhow!(
                "ElevenLabs text-to-speech failed ({}): {}",
                status,
                resp.text().await.unwrap_or_default()
            ));
        }

        stream_response_to_path(resp, output).await?;
        info!("Synthesized {} chars to {}", text.chars().count(), output.display());
        Ok(())
    }

    async fn voices(&self) -> Result<Value> {
        let url = format!("{}/voices", self.api_base);
        let resp = self.authorized(self.client.get(&url)).send().await?;

        if !resp.status().is_success() {
            return Err(anyhow!("ElevenLabs voices failed: {}", resp.status()));
        }
        Ok(resp.json().await?)
    }
}

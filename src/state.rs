// src/state.rs
// Shared handler state: config plus the external seams, all behind Arcs

use reqwest::Client;
use std::sync::Arc;

use crate::config::CompanionConfig;
use crate::core::ops::dialogue::DialogueOrchestrator;
use crate::core::ops::image::ImageStore;
use crate::core::ops::lipsync::{AudioLayout, LipSyncRunner};
use crate::llm::{ImageModel, OpenAIClient};
use crate::services::{ElevenLabsClient, SpeechSynthesizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CompanionConfig>,
    pub http: Client,
    pub dialogue: Arc<DialogueOrchestrator>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub image_model: Arc<dyn ImageModel>,
    pub images: ImageStore,
}

impl AppState {
    /// Wire the production clients from `config`
    pub fn from_config(config: CompanionConfig) -> anyhow::Result<Self> {
        let http = Client::builder().build()?;

        let openai = Arc::new(OpenAIClient::from_config(http.clone(), &config));
        let speech: Arc<dyn SpeechSynthesizer> = Arc::new(ElevenLabsClient::from_config(http.clone(), &config));

        let layout = AudioLayout::new(&config.audios_dir);
        let lipsync = Arc::new(LipSyncRunner::new(
            layout.clone(),
            &config.ffmpeg_bin,
            &config.rhubarb_bin,
        ));

        let dialogue = Arc::new(DialogueOrchestrator::new(
            openai.clone(),
            speech.clone(),
            lipsync,
            layout,
            config.chat_credentials_ready(),
        ));

        let images = ImageStore::new(http.clone(), config.textures_dir(), &config.textures_subdir);

        Ok(Self {
            config: Arc::new(config),
            http,
            dialogue,
            speech,
            image_model: openai,
            images,
        })
    }
}

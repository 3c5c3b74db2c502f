// tests/test_helpers.rs
// Fakes for the external seams and a throwaway upstream server

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Json, Router, extract::Query, routing::get};
use reqwest::Client;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use companion::config::CompanionConfig;
use companion::core::CoreResult;
use companion::core::ops::dialogue::DialogueOrchestrator;
use companion::core::ops::image::ImageStore;
use companion::core::ops::lipsync::{AudioLayout, LipSync};
use companion::llm::{ChatModel, ImageModel};
use companion::services::SpeechSynthesizer;
use companion::state::AppState;

pub const MODEL_REPLY: &str = r#"[
    {"text": "I'm so happy you're here!", "facialExpression": "smile", "animation": "Talking_0"},
    {"text": "Want to dance?", "facialExpression": "funnyFace", "animation": "Rumba"}
]"#;

pub struct CannedModel(pub String);

#[async_trait]
impl ChatModel for CannedModel {
    async fn complete(&self, _system_prompt: &str, _user_message: &str) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Always hands back the same image URL
pub struct FixedImageModel(pub String);

#[async_trait]
impl ImageModel for FixedImageModel {
    async fn generate_image(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

pub struct FakeSpeech;

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn text_to_speech(&self, text: &str, output: &Path) -> anyhow::Result<()> {
        tokio::fs::write(output, format!("mp3:{}", text)).await?;
        Ok(())
    }

    async fn voices(&self) -> anyhow::Result<Value> {
        Ok(json!({ "voices": [{ "voice_id": "EXAVITQu4vr4xnSDxMaL", "name": "Bella" }] }))
    }
}

/// Speech provider that is down
pub struct FailingSpeech;

#[async_trait]
impl SpeechSynthesizer for FailingSpeech {
    async fn text_to_speech(&self, _text: &str, _output: &Path) -> anyhow::Result<()> {
        anyhow::bail!("ElevenLabs text-to-speech failed (503 Service Unavailable)")
    }

    async fn voices(&self) -> anyhow::Result<Value> {
        anyhow::bail!("ElevenLabs voices failed: 503 Service Unavailable")
    }
}

/// Writes a one-cue transcript instead of running ffmpeg + rhubarb
pub struct FakeLipSync(pub AudioLayout);

#[async_trait]
impl LipSync for FakeLipSync {
    async fn lip_sync_message(&self, index: usize) -> CoreResult<()> {
        let cues = json!({ "mouthCues": [{ "start": 0.0, "end": 0.5, "value": "B" }], "index": index });
        tokio::fs::write(self.0.transcript_path(index), cues.to_string())
            .await
            .map_err(|e| companion::core::CoreError::FileWrite("transcript".into(), e.to_string()))
    }
}

/// Scratch directories laid out like a deployment
pub struct Workspace {
    pub root: tempfile::TempDir,
}

impl Workspace {
    pub async fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let audios = root.path().join("audios");
        tokio::fs::create_dir_all(&audios).await.unwrap();
        tokio::fs::create_dir_all(root.path().join("public/textures")).await.unwrap();

        for stem in ["intro_0", "intro_1", "api_0", "api_1"] {
            tokio::fs::write(audios.join(format!("{}.wav", stem)), format!("wav:{}", stem))
                .await
                .unwrap();
            tokio::fs::write(
                audios.join(format!("{}.json", stem)),
                json!({ "metadata": { "soundFile": format!("{}.wav", stem) }, "mouthCues": [] }).to_string(),
            )
            .await
            .unwrap();
        }

        Self { root }
    }

    pub fn config(&self) -> CompanionConfig {
        CompanionConfig {
            public_dir: self.root.path().join("public"),
            audios_dir: self.root.path().join("audios"),
            ..CompanionConfig::default()
        }
    }
}

/// App state with every external seam faked
pub fn fake_state(config: CompanionConfig, model_reply: &str, image_url: &str) -> AppState {
    fake_state_with_speech(config, model_reply, image_url, Arc::new(FakeSpeech))
}

pub fn fake_state_with_speech(
    config: CompanionConfig,
    model_reply: &str,
    image_url: &str,
    speech: Arc<dyn SpeechSynthesizer>,
) -> AppState {
    let http = Client::new();
    let layout = AudioLayout::new(&config.audios_dir);

    let dialogue = Arc::new(DialogueOrchestrator::new(
        Arc::new(CannedModel(model_reply.to_string())),
        speech.clone(),
        Arc::new(FakeLipSync(layout.clone())),
        layout,
        config.chat_credentials_ready(),
    ));

    let images = ImageStore::new(http.clone(), config.textures_dir(), &config.textures_subdir);

    AppState {
        config: Arc::new(config),
        http,
        dialogue,
        speech,
        image_model: Arc::new(FixedImageModel(image_url.to_string())),
        images,
    }
}

/// Local server standing in for the image CDN and the search API.
///
/// `/images/{name}` returns bytes; `/customsearch/v1` echoes the paging
/// parameters it was called with and reports `totalResults` = "95".
pub async fn spawn_upstream() -> String {
    let router = Router::new()
        .route("/images/cat.png", get(|| async { "cat-png-bytes" }))
        .route("/images/dog.png", get(|| async { "dog-png-bytes" }))
        .route(
            "/customsearch/v1",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "searchInformation": { "totalResults": "95" },
                    "items": [
                        { "link": format!("https://img.example.com/{}/start-{}", params["q"], params["start"]) },
                        { "link": format!("https://img.example.com/num-{}/{}", params["num"], params["searchType"]) },
                    ]
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

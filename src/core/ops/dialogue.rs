//! Dialogue pipeline
//!
//! Turns a user message into up to three companion lines, each carrying
//! synthesized speech and its mouth-cue transcript. Every step is awaited in
//! order: message 0 is fully synthesized and lip-synced before message 1
//! starts. There are no retries; the first failure aborts the whole reply.

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::super::types::{Animation, FacialExpression, ReplyMessage};
use super::super::{CoreError, CoreResult};
use super::file;
use super::lipsync::{AudioLayout, LipSync};
use crate::llm::ChatModel;
use crate::services::SpeechSynthesizer;

/// Upper bound on lines in one reply
pub const MAX_REPLY_MESSAGES: usize = 3;

pub const SYSTEM_PROMPT: &str = "\
You are a virtual girlfriend.
You will always reply with a JSON array of messages. With a maximum of 3 messages.
Each message has a text, facialExpression, and animation property.
The different facial expressions are: smile, sad, angry, surprised, funnyFace, and default.
The different animations are: Talking_0, Talking_1, Talking_2, Crying, Laughing, Rumba, Idle, Terrified, and Angry.";

/// A pre-rendered line whose audio and transcript already sit in the audios
/// directory
pub struct ScriptedLine {
    pub text: &'static str,
    pub audio_file: &'static str,
    pub transcript_file: &'static str,
    pub facial_expression: FacialExpression,
    pub animation: Animation,
}

/// Greeting sent when the user says nothing
pub const INTRO_SCRIPT: [ScriptedLine; 2] = [
    ScriptedLine {
        text: "Hey dear... How was your day?",
        audio_file: "intro_0.wav",
        transcript_file: "intro_0.json",
        facial_expression: FacialExpression::Smile,
        animation: Animation::Talking1,
    },
    ScriptedLine {
        text: "I missed you so much... Please don't go for so long!",
        audio_file: "intro_1.wav",
        transcript_file: "intro_1.json",
        facial_expression: FacialExpression::Sad,
        animation: Animation::Crying,
    },
];

/// In-character reminder sent when credentials are not configured
pub const MISSING_KEYS_SCRIPT: [ScriptedLine; 2] = [
    ScriptedLine {
        text: "Please my dear, don't forget to add your API keys!",
        audio_file: "api_0.wav",
        transcript_file: "api_0.json",
        facial_expression: FacialExpression::Angry,
        animation: Animation::Angry,
    },
    ScriptedLine {
        text: "You don't want to ruin Wawa Sensei with a crazy ChatGPT and ElevenLabs bill, right?",
        audio_file: "api_1.wav",
        transcript_file: "api_1.json",
        facial_expression: FacialExpression::Smile,
        animation: Animation::Laughing,
    },
];

// The model sometimes wraps the array in an object
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelReply {
    Bare(Vec<ReplyMessage>),
    Wrapped { messages: Vec<ReplyMessage> },
}

/// Parse raw model output into at most [`MAX_REPLY_MESSAGES`] lines
pub fn parse_reply(content: &str) -> CoreResult<Vec<ReplyMessage>> {
    let reply: ModelReply = serde_json::from_str(content.trim())
        .map_err(|e| CoreError::MalformedReply(e.to_string()))?;

    let mut messages = match reply {
        ModelReply::Bare(messages) => messages,
        ModelReply::Wrapped { messages } => messages,
    };

    if messages.is_empty() {
        return Err(CoreError::MalformedReply("reply contained no messages".to_string()));
    }
    messages.truncate(MAX_REPLY_MESSAGES);
    Ok(messages)
}

pub struct DialogueOrchestrator {
    chat: Arc<dyn ChatModel>,
    speech: Arc<dyn SpeechSynthesizer>,
    lipsync: Arc<dyn LipSync>,
    layout: AudioLayout,
    credentials_ready: bool,
}

impl DialogueOrchestrator {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        speech: Arc<dyn SpeechSynthesizer>,
        lipsync: Arc<dyn LipSync>,
        layout: AudioLayout,
        credentials_ready: bool,
    ) -> Self {
        Self {
            chat,
            speech,
            lipsync,
            layout,
            credentials_ready,
        }
    }

    /// Build the full reply to `user_message`
    pub async fn reply(&self, user_message: Option<&str>) -> CoreResult<Vec<ReplyMessage>> {
        let Some(user_message) = user_message.filter(|m| !m.is_empty()) else {
            return self.scripted(&INTRO_SCRIPT).await;
        };

        if !self.credentials_ready {
            info!("Chat credentials missing, sending scripted reminder");
            return self.scripted(&MISSING_KEYS_SCRIPT).await;
        }

        let content = self.chat.complete(SYSTEM_PROMPT, user_message).await?;
        let mut messages = parse_reply(&content)?;
        info!("Model replied with {} message(s)", messages.len());

        for (index, message) in messages.iter_mut().enumerate() {
            let speech_path = self.layout.speech_path(index);
            self.speech.text_to_speech(&message.text, &speech_path).await?;
            self.lipsync.lip_sync_message(index).await?;

            message.audio = Some(file::read_base64(&speech_path).await?);
            message.lipsync = Some(file::read_json(&self.layout.transcript_path(index)).await?);
        }

        Ok(messages)
    }

    async fn scripted(&self, script: &[ScriptedLine]) -> CoreResult<Vec<ReplyMessage>> {
        let mut messages = Vec::with_capacity(script.len());
        for line in script {
            let mut message = ReplyMessage::new(line.text, line.facial_expression, line.animation);
            message.audio = Some(file::read_base64(&self.layout.asset(line.audio_file)).await?);
            message.lipsync = Some(file::read_json(&self.layout.asset(line.transcript_file)).await?);
            messages.push(message);
        }
        Ok(messages)
    }
}

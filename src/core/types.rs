//! Reply message model shared by the dialogue pipeline and the HTTP layer

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Facial expression the avatar wears while speaking a message.
///
/// Unknown values coming back from the model collapse to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacialExpression {
    Smile,
    Sad,
    Angry,
    Surprised,
    FunnyFace,
    #[default]
    #[serde(other)]
    Default,
}

/// Body animation played while a message is spoken.
///
/// Unknown values collapse to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Animation {
    #[serde(rename = "Talking_0")]
    Talking0,
    #[serde(rename = "Talking_1")]
    Talking1,
    #[serde(rename = "Talking_2")]
    Talking2,
    Crying,
    Laughing,
    Rumba,
    Terrified,
    Angry,
    // Catch-all must stay the last variant
    #[default]
    #[serde(other)]
    Idle,
}

/// One line of the companion's reply.
///
/// `audio` and `lipsync` are attached after synthesis and stay off the wire
/// until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessage {
    pub text: String,
    #[serde(default)]
    pub facial_expression: FacialExpression,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lipsync: Option<Value>,
}

impl ReplyMessage {
    pub fn new(text: impl Into<String>, facial_expression: FacialExpression, animation: Animation) -> Self {
        Self {
            text: text.into(),
            facial_expression,
            animation,
            audio: None,
            lipsync: None,
        }
    }
}

//! The request and response shapes exchanged with callers.
//!
//! Callers only ever see plain text messages. Tool results stay inside a
//! dialogue run; an assistant turn that called actions comes back with just
//! its text, which may be empty.

use serde::{Deserialize, Serialize};
use travel_agent_core::SessionState;
use travel_agent_model::ModelMessage;

/// Author of a [`ChatMessage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the assistant.
    System,
    /// The traveler.
    User,
    /// The assistant.
    Assistant,
}

/// A text message as seen by callers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Converts a dialogue message. Tool results have no caller-facing
    /// form and yield `None`.
    pub fn from_model(message: &ModelMessage) -> Option<Self> {
        let role = match message {
            ModelMessage::System { .. } => ChatRole::System,
            ModelMessage::User { .. } => ChatRole::User,
            ModelMessage::Assistant(_) => ChatRole::Assistant,
            ModelMessage::Tool(_) => return None,
        };
        Some(Self {
            role,
            content: message.content().to_owned(),
        })
    }
}

impl From<ChatMessage> for ModelMessage {
    #[inline]
    fn from(message: ChatMessage) -> Self {
        match message.role {
            ChatRole::System => ModelMessage::system(message.content),
            ChatRole::User => ModelMessage::user(message.content),
            ChatRole::Assistant => ModelMessage::assistant(message.content),
        }
    }
}

/// One round of conversation sent by a caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The conversation so far, ending with the newest user message.
    pub messages: Vec<ChatMessage>,
    /// The state returned by the previous round, if any.
    #[serde(default)]
    pub state: Option<SessionState>,
}

/// The reply to a [`ChatRequest`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The conversation including the assistant's answer.
    pub messages: Vec<ChatMessage>,
    /// State to send back with the next request.
    pub state: SessionState,
}

impl ChatResponse {
    /// Returns the text of the last assistant message.
    pub fn reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role == ChatRole::Assistant)
            .map(|msg| msg.content.as_str())
    }
}

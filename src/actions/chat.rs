//! Chat with the hosted assistant
//!
//! The model call itself sits behind `ChatClient`; a conversation only
//! earns XP once a reply actually arrives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progression::AwardSource;

/// Chat failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Assistant returned an empty reply")]
    EmptyReply,
    #[error("Assistant unavailable: {0}")]
    Backend(String),
}

/// Remote model seam
pub trait ChatClient {
    /// Send one user message and return the assistant's reply text
    fn reply(&mut self, message: &str) -> Result<String, ChatError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Transcript of one chat
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a message through `client`.
    ///
    /// On success both turns are recorded and the reply comes back with the
    /// award to grant. On failure the transcript is unchanged and nothing
    /// is awarded.
    pub fn send(
        &mut self,
        client: &mut dyn ChatClient,
        message: &str,
    ) -> Result<(String, AwardSource), ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let reply = client.reply(message)?;
        if reply.trim().is_empty() {
            return Err(ChatError::EmptyReply);
        }

        self.turns.push(ChatTurn {
            speaker: Speaker::User,
            text: message.to_string(),
        });
        self.turns.push(ChatTurn {
            speaker: Speaker::Assistant,
            text: reply.clone(),
        });
        Ok((reply, AwardSource::ChatReply))
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }
}

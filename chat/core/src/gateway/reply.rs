//! Bot Replies
//!
//! The reply body differs by bot kind. Knowledge-based bots wrap their answer
//! in a list of messages, each with its own list of response entries; model
//! bots return a plain list of messages. Both are decoded into [`BotReply`]
//! and turned into text with [`BotReply::into_text`].

use serde::Deserialize;
use serde_json::Value;

use super::traits::BotKind;
use crate::error::GatewayError;

/// Conversation record returned by a knowledge-based bot
#[derive(Clone, Debug, Default, Deserialize)]
pub struct KnowledgeReply {
    /// Messages produced for this turn
    #[serde(default)]
    pub message: Vec<KnowledgeMessage>,
}

/// One message of a knowledge-based reply
#[derive(Clone, Debug, Default, Deserialize)]
pub struct KnowledgeMessage {
    /// Response entries; the first one is expected to be text
    #[serde(default)]
    pub response_message: Vec<Value>,
}

/// Conversation record returned by a conversational-model bot
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConversationReply {
    /// Messages produced for this turn
    #[serde(default)]
    pub message: Vec<Value>,
}

/// Raw reply from a bot, tagged by the bot's kind
#[derive(Clone, Debug)]
pub enum BotReply {
    /// Reply of a knowledge-based bot
    KnowledgeBased(KnowledgeReply),
    /// Reply of a conversational-model bot
    ConversationalModel(ConversationReply),
}

impl BotReply {
    /// Decode a response body according to the bot kind
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] when the body is not a JSON object of
    /// the expected shape.
    pub fn decode(kind: BotKind, body: &str) -> Result<Self, GatewayError> {
        Ok(match kind {
            BotKind::KnowledgeBased => Self::KnowledgeBased(serde_json::from_str(body)?),
            BotKind::ConversationalModel => Self::ConversationalModel(serde_json::from_str(body)?),
        })
    }

    /// Extract the reply text
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedReply`] when the record is empty or its
    /// first entry is not a string.
    pub fn into_text(self) -> Result<String, GatewayError> {
        match self {
            Self::KnowledgeBased(reply) => {
                let first = reply.message.into_iter().next().ok_or_else(|| {
                    GatewayError::MalformedReply("knowledge reply has no messages".to_string())
                })?;
                let entry = first.response_message.into_iter().next().ok_or_else(|| {
                    GatewayError::MalformedReply(
                        "knowledge reply message has no response entries".to_string(),
                    )
                })?;
                expect_text(entry, "knowledge reply entry")
            }
            Self::ConversationalModel(reply) => {
                let first = reply.message.into_iter().next().ok_or_else(|| {
                    GatewayError::MalformedReply("conversation reply has no messages".to_string())
                })?;
                expect_text(first, "conversation reply message")
            }
        }
    }
}

fn expect_text(value: Value, what: &str) -> Result<String, GatewayError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(GatewayError::MalformedReply(format!(
            "{what} is not text: {other}"
        ))),
    }
}

//! Gateway Traits
//!
//! The records the platform hands back and the trait every gateway
//! implements.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use super::reply::BotReply;
use crate::error::GatewayError;

/// Bot identifier as assigned by the platform
pub type BotId = i64;

/// One entry of the user's bot catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSummary {
    /// Unique bot identifier
    pub id: BotId,
    /// Display name
    pub name: String,
    /// Free-form description (empty when the platform has none)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl BotSummary {
    /// Create a summary
    pub fn new(id: BotId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The full bot record needed to exchange messages
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    /// Unique bot identifier
    pub id: BotId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Language model backing the bot; empty for knowledge-based bots
    #[serde(default, deserialize_with = "null_as_empty")]
    pub model_name: String,
}

impl Bot {
    /// Create a bot record
    pub fn new(id: BotId, name: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            model_name: model_name.into(),
        }
    }

    /// Which reply shape this bot produces
    #[must_use]
    pub fn kind(&self) -> BotKind {
        if self.model_name.trim().is_empty() {
            BotKind::KnowledgeBased
        } else {
            BotKind::ConversationalModel
        }
    }
}

/// How a bot generates replies, which decides how replies are decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotKind {
    /// Answers from a curated knowledge base
    KnowledgeBased,
    /// Answers from a conversational language model
    ConversationalModel,
}

/// Remote bot platform
///
/// Implementations hold their own credential; they are created once at
/// startup and shared read-only between tasks.
#[async_trait]
pub trait RemoteBotGateway: Send + Sync {
    /// Get the gateway name (e.g., "Sarufi")
    fn name(&self) -> &str;

    /// Authenticate with the configured credential and list the user's bots
    async fn authenticate(&self) -> Result<Vec<BotSummary>, GatewayError>;

    /// Fetch the full record of one bot
    async fn get_bot(&self, id: BotId) -> Result<Bot, GatewayError>;

    /// Send `message` to `bot` and return its raw reply
    async fn respond(
        &self,
        bot: &Bot,
        message: &str,
        channel: &str,
    ) -> Result<BotReply, GatewayError>;
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

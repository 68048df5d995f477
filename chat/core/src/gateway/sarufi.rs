//! Sarufi Gateway Implementation
//!
//! HTTP gateway for the Sarufi developer API.
//!
//! # Sarufi API
//!
//! - `GET /chatbots` - List the caller's bots
//! - `GET /chatbot/{id}` - Fetch one bot
//! - `POST /conversation` - Send a message and receive the bot's reply
//!
//! Every request carries the API key as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::reply::BotReply;
use super::traits::{Bot, BotId, BotSummary, RemoteBotGateway};
use crate::config::ClientConfig;
use crate::error::GatewayError;

/// Body of a conversation request
#[derive(Debug, Serialize)]
struct ConversationRequest<'a> {
    chatbot_id: BotId,
    message: &'a str,
    message_type: &'a str,
    channel: &'a str,
    chat_id: &'a str,
}

/// Sarufi API client
#[derive(Clone)]
pub struct SarufiGateway {
    /// API root, without trailing slash
    base_url: String,
    /// Bearer credential
    api_key: String,
    /// Conversation identifier for this process
    chat_id: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl SarufiGateway {
    /// Create a new gateway
    ///
    /// `timeout` bounds every request; `None` lets requests run until the
    /// server answers.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            chat_id: format!("sarufi-tui-{}", uuid::Uuid::new_v4()),
            http_client: builder.build()?,
        })
    }

    /// Create from a loaded [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, GatewayError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    /// Conversation identifier sent with every message
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and return the body of a successful response
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, GatewayError> {
        let response = request.bearer_auth(&self.api_key).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let mut message = error_detail(&body);
            if message.is_empty() {
                message = status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string();
            }
            tracing::warn!(status = status.as_u16(), %message, "Sarufi request failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

/// Pull a human-readable message out of an error body
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl RemoteBotGateway for SarufiGateway {
    fn name(&self) -> &str {
        "Sarufi"
    }

    async fn authenticate(&self) -> Result<Vec<BotSummary>, GatewayError> {
        let body = self
            .execute(self.http_client.get(self.url("chatbots")))
            .await?;
        let bots: Vec<BotSummary> = serde_json::from_str(&body)?;
        tracing::info!(count = bots.len(), "Authenticated with Sarufi");
        Ok(bots)
    }

    async fn get_bot(&self, id: BotId) -> Result<Bot, GatewayError> {
        let body = self
            .execute(self.http_client.get(self.url(&format!("chatbot/{id}"))))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn respond(
        &self,
        bot: &Bot,
        message: &str,
        channel: &str,
    ) -> Result<BotReply, GatewayError> {
        let request = ConversationRequest {
            chatbot_id: bot.id,
            message,
            message_type: "text",
            channel,
            chat_id: &self.chat_id,
        };

        let body = self
            .execute(self.http_client.post(self.url("conversation")).json(&request))
            .await?;

        BotReply::decode(bot.kind(), &body)
    }
}

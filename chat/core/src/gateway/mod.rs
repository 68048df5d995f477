//! Sarufi Gateway Integration
//!
//! Access to the remote bot platform through a common trait, so the
//! controller and task runner never care whether they talk to the real API
//! or a test double.
//!
//! # Usage
//!
//! ```ignore
//! use sarufi_chat_core::gateway::{RemoteBotGateway, SarufiGateway};
//!
//! let gateway = SarufiGateway::new("https://developers.sarufi.io", api_key, None)?;
//! let bots = gateway.authenticate().await?;
//! let bot = gateway.get_bot(bots[0].id).await?;
//! let text = gateway.respond(&bot, "hi", "general").await?.into_text()?;
//! ```

mod reply;
mod sarufi;
mod traits;

pub use reply::{BotReply, ConversationReply, KnowledgeMessage, KnowledgeReply};
pub use sarufi::SarufiGateway;
pub use traits::{Bot, BotId, BotKind, BotSummary, RemoteBotGateway};

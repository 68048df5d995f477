//! Sarufi Chat Core - Headless interaction core for the Sarufi chat TUI
//!
//! This crate holds everything the terminal client does except drawing: the
//! session data model, the interaction state machine, the pure renderer, the
//! gateway to the Sarufi API and the task runner that keeps network calls off
//! the event loop.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      tui (ratatui)                           │
//! │   crossterm keys ──► Event::KeyPressed      View ◄── render  │
//! └──────────────┬───────────────────────────────▲───────────────┘
//!                │ Event                         │ &SessionState
//! ┌──────────────▼───────────────────────────────┴───────────────┐
//! │                InteractionController                         │
//! │        (owns SessionState, returns Vec<Task>)                │
//! └──────────────┬───────────────────────────────▲───────────────┘
//!                │ Task                          │ completion Event
//! ┌──────────────▼───────────────────────────────┴───────────────┐
//! │   TaskRunner ── tokio::spawn ──► RemoteBotGateway (HTTP)     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use sarufi_chat_core::{
//!     load_config, Event, InteractionController, Renderer, SarufiGateway, TaskRunner,
//! };
//! use tokio::sync::mpsc;
//!
//! let config = load_config()?;
//! let gateway = Arc::new(SarufiGateway::from_config(&config)?);
//! let (tx, mut rx) = mpsc::channel(100);
//! let runner = TaskRunner::new(gateway, tx, config.channel.clone());
//!
//! let mut controller = InteractionController::new();
//! runner.launch_all(controller.start());
//!
//! while let Some(event) = rx.recv().await {
//!     runner.launch_all(controller.handle_event(event));
//!     println!("{}", Renderer::new(config.wrap_width).render(controller.state()));
//! }
//! ```
//!
//! # No TUI Dependencies
//!
//! Keys arrive as [`Key`] values and frames leave as [`View`] values, so
//! this crate never links ratatui or crossterm.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gateway;
pub mod session;
pub mod tasks;
pub mod text;
pub mod view;
pub mod widgets;

pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with, ClientConfig,
    ClientToml, ConfigOverrides, ConfigSource, API_KEY_VAR, DEFAULT_BASE_URL, DEFAULT_CHANNEL,
};
pub use controller::InteractionController;
pub use error::{ConfigError, GatewayError};
pub use events::{Event, Key};
pub use gateway::{
    Bot, BotId, BotKind, BotReply, BotSummary, ConversationReply, KnowledgeMessage,
    KnowledgeReply, RemoteBotGateway, SarufiGateway,
};
pub use session::{Screen, SessionState, Speaker, Transcript, TranscriptEntry};
pub use tasks::{Task, TaskRunner};
pub use text::word_wrap;
pub use view::{BotListItem, Footer, RenderedEntry, Renderer, View};
pub use widgets::{BotList, Spinner, SpinnerStyle, TextInput};

//! Sarufi TUI - Terminal chat client for Sarufi bots
//!
//! A thin surface over `sarufi-chat-core`: crossterm keys go in as core
//! events, core views come out as ratatui widgets.
//!
//! # Architecture
//!
//! - **App**: the event loop (terminal input, task completions, spinner tick)
//! - **Input**: crossterm key events mapped to core keys
//! - **Ui**: drawing of the core's `View`
//! - **Cli**: command line flags layered over the config file and environment

pub mod app;
pub mod cli;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::App;

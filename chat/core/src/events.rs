//! Controller Events
//!
//! Everything that can change the session arrives as an [`Event`]: key
//! presses from the terminal, completions from background tasks and the
//! animation tick. Events are processed one at a time in arrival order.

use crate::error::GatewayError;
use crate::gateway::{Bot, BotSummary};

/// A key press, independent of the terminal library
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Printable character
    Char(char),
    /// Character pressed with Control
    Ctrl(char),
    /// Enter / Return
    Enter,
    /// Escape
    Esc,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Tab
    Tab,
    /// Anything else
    Other,
}

impl Key {
    /// Quit aliases: Ctrl+C and Esc
    #[must_use]
    pub fn is_quit(self) -> bool {
        matches!(self, Key::Ctrl('c') | Key::Esc)
    }

    /// Back-to-list key: Ctrl+B
    #[must_use]
    pub fn is_back(self) -> bool {
        matches!(self, Key::Ctrl('b'))
    }
}

/// Events consumed by the [`InteractionController`](crate::InteractionController)
#[derive(Debug)]
pub enum Event {
    /// User pressed a key
    KeyPressed(Key),
    /// The startup authentication task finished
    AuthenticationCompleted(Result<Vec<BotSummary>, GatewayError>),
    /// The fetch of the chosen bot finished
    BotLoaded(Result<Bot, GatewayError>),
    /// A send task finished with the bot's reply text
    BotReplyCompleted(Result<String, GatewayError>),
    /// Animation tick
    TimerTick,
}

impl Event {
    /// Short name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::KeyPressed(_) => "KeyPressed",
            Self::AuthenticationCompleted(_) => "AuthenticationCompleted",
            Self::BotLoaded(_) => "BotLoaded",
            Self::BotReplyCompleted(_) => "BotReplyCompleted",
            Self::TimerTick => "TimerTick",
        }
    }
}

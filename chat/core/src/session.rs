//! Session State
//!
//! The data model of one client run: which screen is active, the bot
//! catalog, the selected bot, the transcript and the pending error.
//!
//! State is created once at startup and mutated only by the
//! [`InteractionController`](crate::InteractionController); everything else
//! sees it through the read-only accessors below.

use std::fmt;

use crate::gateway::{Bot, BotId};
use crate::widgets::{BotList, Spinner, SpinnerStyle, TextInput};

/// Placeholder of the message input
pub const INPUT_PLACEHOLDER: &str = "Write a message";

/// Maximum characters in one message
pub const INPUT_CHAR_LIMIT: usize = 156;

/// The mutually exclusive UI modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Listing the user's bots from the gateway
    #[default]
    Authenticating,
    /// Choosing a bot
    ListingBots,
    /// Typing a message to the selected bot
    MessagingBot,
    /// A message is on its way; waiting for the reply
    WaitingForResponse,
}

impl Screen {
    /// Whether a bot must be selected in this screen
    #[must_use]
    pub fn requires_bot(self) -> bool {
        matches!(self, Self::MessagingBot | Self::WaitingForResponse)
    }
}

/// Who said a transcript line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    /// The local user
    You,
    /// The remote bot
    Bot,
}

impl Speaker {
    /// Label prefix for this speaker
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::You => "You: ",
            Self::Bot => "Bot: ",
        }
    }
}

/// One labeled transcript line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Who said it
    pub speaker: Speaker,
    /// What was said
    pub text: String,
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.speaker.prefix(), self.text)
    }
}

/// Ordered, append-only record of the current conversation
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line from the user
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Speaker::You, text.into());
    }

    /// Append a line from the bot
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.push(Speaker::Bot, text.into());
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.entries.push(TranscriptEntry { speaker, text });
    }

    /// Entries in order
    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Entries as labeled lines (`"You: ..."`, `"Bot: ..."`)
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry; only done when switching bots
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Everything the renderer needs to draw a frame
#[derive(Clone, Debug)]
pub struct SessionState {
    pub(crate) screen: Screen,
    pub(crate) bots: BotList,
    pub(crate) selected_bot: Option<Bot>,
    pub(crate) transcript: Transcript,
    pub(crate) pending_error: Option<String>,
    pub(crate) input: TextInput,
    pub(crate) auth_spinner: Spinner,
    pub(crate) reply_spinner: Spinner,
    /// Bot whose record is being fetched
    pub(crate) loading_bot: Option<BotId>,
    pub(crate) quit: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            screen: Screen::Authenticating,
            bots: BotList::new(),
            selected_bot: None,
            transcript: Transcript::new(),
            pending_error: None,
            input: TextInput::new()
                .with_placeholder(INPUT_PLACEHOLDER)
                .with_char_limit(INPUT_CHAR_LIMIT),
            auth_spinner: Spinner::new(SpinnerStyle::Dot),
            reply_spinner: Spinner::new(SpinnerStyle::Jump),
            loading_bot: None,
            quit: false,
        }
    }
}

impl SessionState {
    /// Fresh state on the `Authenticating` screen
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active screen
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Bot catalog
    #[must_use]
    pub fn bots(&self) -> &BotList {
        &self.bots
    }

    /// Bot being chatted with
    #[must_use]
    pub fn selected_bot(&self) -> Option<&Bot> {
        self.selected_bot.as_ref()
    }

    /// Conversation with the selected bot
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Last failure, which replaces every screen once set
    #[must_use]
    pub fn pending_error(&self) -> Option<&str> {
        self.pending_error.as_deref()
    }

    /// Message input
    #[must_use]
    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// Spinner shown while authenticating
    #[must_use]
    pub fn auth_spinner(&self) -> &Spinner {
        &self.auth_spinner
    }

    /// Spinner shown while waiting for a reply
    #[must_use]
    pub fn reply_spinner(&self) -> &Spinner {
        &self.reply_spinner
    }

    /// Bot whose record is being fetched, if any
    #[must_use]
    pub fn loading_bot(&self) -> Option<BotId> {
        self.loading_bot
    }

    /// Whether the user asked to quit
    #[must_use]
    pub fn is_quitting(&self) -> bool {
        self.quit
    }

    /// Switch to chatting with `bot`, starting a new transcript
    pub(crate) fn enter_messaging(&mut self, bot: Bot) {
        self.selected_bot = Some(bot);
        self.transcript.reset();
        self.input.clear();
        self.input.focus();
        self.screen = Screen::MessagingBot;
    }

    /// Record a failure; the latest one wins
    pub(crate) fn set_error(&mut self, message: String) {
        self.pending_error = Some(message);
    }

    /// Check the structural invariants
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.screen.requires_bot() || self.selected_bot.is_some()
    }
}

//! Renderer
//!
//! Turns a [`SessionState`] into a [`View`]: the structured content of one
//! frame. Rendering is pure; the surface decides how the view is drawn, and
//! the [`Display`](fmt::Display) impl gives the plain-text frame.

use std::fmt;

use crate::session::{Screen, SessionState, Speaker};
use crate::text::word_wrap;

/// Title above the bot catalog
pub const BOT_LIST_TITLE: &str = "My Sarufi Bots";

/// Default transcript wrap width in characters
pub const DEFAULT_WRAP_WIDTH: usize = 50;

/// One row of the bot catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotListItem {
    /// Bot name
    pub title: String,
    /// Bot description
    pub description: String,
}

/// One transcript entry, already wrapped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEntry {
    /// Who said it
    pub speaker: Speaker,
    /// Labeled, wrapped text (`"You: ..."`)
    pub text: String,
}

/// Bottom line of the conversation screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Footer {
    /// The message input
    Input {
        /// Typed text
        value: String,
        /// Shown while `value` is empty
        placeholder: String,
        /// Cursor position in characters
        cursor: usize,
    },
    /// Waiting for the bot's reply
    Waiting {
        /// Current spinner frame
        spinner: &'static str,
    },
}

/// Content of one frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Nothing; the client is quitting
    Empty,
    /// A failure replaces the whole screen
    Error(String),
    /// Waiting for the bot catalog
    Authenticating {
        /// Current spinner frame
        spinner: &'static str,
    },
    /// Choosing a bot
    BotList {
        /// List title
        title: String,
        /// Rows passing the filter, in catalog order
        items: Vec<BotListItem>,
        /// Filter text while filtering
        filter: Option<String>,
        /// Highlighted row
        selected: Option<usize>,
        /// A bot record is being fetched
        loading: bool,
    },
    /// Chatting with a bot
    Conversation {
        /// `"Bot: <name>"`
        header: String,
        /// Transcript in order
        entries: Vec<RenderedEntry>,
        /// Input or spinner
        footer: Footer,
    },
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Empty => Ok(()),
            View::Error(message) => write!(f, "{message}"),
            View::Authenticating { spinner } => write!(f, "{spinner} Authenticating"),
            View::BotList {
                title,
                items,
                filter,
                selected,
                ..
            } => {
                writeln!(f, "{title}")?;
                if let Some(filter) = filter {
                    writeln!(f, "Filter: {filter}")?;
                }
                for (i, item) in items.iter().enumerate() {
                    let marker = if *selected == Some(i) { "> " } else { "  " };
                    writeln!(f)?;
                    writeln!(f, "{marker}{}", item.title)?;
                    if !item.description.is_empty() {
                        writeln!(f, "  {}", item.description)?;
                    }
                }
                Ok(())
            }
            View::Conversation {
                header,
                entries,
                footer,
            } => {
                writeln!(f, "{header}")?;
                for entry in entries {
                    writeln!(f, "{}", entry.text)?;
                }
                write!(f, "\n\n")?;
                match footer {
                    Footer::Input {
                        value, placeholder, ..
                    } if value.is_empty() => write!(f, "> {placeholder}"),
                    Footer::Input { value, .. } => write!(f, "> {value}"),
                    Footer::Waiting { spinner } => write!(f, "{spinner}"),
                }
            }
        }
    }
}

/// Renders session state into views
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    wrap_width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl Renderer {
    /// Create a renderer wrapping the transcript at `wrap_width` characters
    #[must_use]
    pub fn new(wrap_width: usize) -> Self {
        Self { wrap_width }
    }

    /// Transcript wrap width
    #[must_use]
    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Build the view for the current state
    #[must_use]
    pub fn render(&self, state: &SessionState) -> View {
        if state.is_quitting() {
            return View::Empty;
        }
        if let Some(error) = state.pending_error() {
            return View::Error(error.to_string());
        }

        match state.screen() {
            Screen::Authenticating => View::Authenticating {
                spinner: state.auth_spinner().glyph(),
            },
            Screen::ListingBots => View::BotList {
                title: BOT_LIST_TITLE.to_string(),
                items: state
                    .bots()
                    .visible_items()
                    .map(|bot| BotListItem {
                        title: bot.name.clone(),
                        description: bot.description.clone(),
                    })
                    .collect(),
                filter: state.bots().filter().map(str::to_string),
                selected: state.bots().selected_index(),
                loading: state.loading_bot().is_some(),
            },
            Screen::MessagingBot | Screen::WaitingForResponse => {
                let name = state.selected_bot().map_or("", |bot| bot.name.as_str());
                let footer = if state.screen() == Screen::WaitingForResponse {
                    Footer::Waiting {
                        spinner: state.reply_spinner().glyph(),
                    }
                } else {
                    let input = state.input();
                    Footer::Input {
                        value: input.value().to_string(),
                        placeholder: input.placeholder().to_string(),
                        cursor: input.cursor(),
                    }
                };

                View::Conversation {
                    header: format!("Bot: {name}"),
                    entries: state
                        .transcript()
                        .entries()
                        .iter()
                        .map(|entry| RenderedEntry {
                            speaker: entry.speaker,
                            text: word_wrap(&entry.to_string(), self.wrap_width),
                        })
                        .collect(),
                    footer,
                }
            }
        }
    }

    /// Plain-text frame for the current state
    #[must_use]
    pub fn render_text(&self, state: &SessionState) -> String {
        self.render(state).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Bot, BotSummary};
    use pretty_assertions::assert_eq;

    fn chatting() -> SessionState {
        let mut state = SessionState::new();
        state.screen = Screen::ListingBots;
        state.enter_messaging(Bot::new(1, "Echo", ""));
        state
    }

    #[test]
    fn test_authenticating_shows_spinner() {
        let state = SessionState::new();
        let text = Renderer::default().render_text(&state);
        assert_eq!(text, format!("{} Authenticating", state.auth_spinner().glyph()));
    }

    #[test]
    fn test_bot_list_view() {
        let mut state = SessionState::new();
        state.screen = Screen::ListingBots;
        state
            .bots
            .set_items(vec![BotSummary::new(1, "Echo", "repeats you")]);

        let view = Renderer::default().render(&state);
        assert_eq!(
            view,
            View::BotList {
                title: "My Sarufi Bots".to_string(),
                items: vec![BotListItem {
                    title: "Echo".to_string(),
                    description: "repeats you".to_string(),
                }],
                filter: None,
                selected: Some(0),
                loading: false,
            }
        );
        assert_eq!(view.to_string(), "My Sarufi Bots\n\n> Echo\n  repeats you\n");
    }

    #[test]
    fn test_bot_list_view_shows_filter_and_matches() {
        let mut state = SessionState::new();
        state.screen = Screen::ListingBots;
        state.bots.set_items(vec![
            BotSummary::new(1, "Echo", ""),
            BotSummary::new(2, "Shop", ""),
        ]);
        for c in "/sh".chars() {
            state.bots.handle_key(crate::Key::Char(c));
        }

        assert_eq!(
            Renderer::default().render_text(&state),
            "My Sarufi Bots\nFilter: sh\n\n> Shop\n"
        );
    }

    #[test]
    fn test_conversation_with_placeholder() {
        let state = chatting();
        assert_eq!(
            Renderer::default().render_text(&state),
            "Bot: Echo\n\n\n> Write a message"
        );
    }

    #[test]
    fn test_conversation_wraps_entries() {
        let mut state = chatting();
        state.transcript.push_user("hi there friend");
        state.transcript.push_bot("hello");
        state.screen = Screen::WaitingForResponse;

        let text = Renderer::new(8).render_text(&state);
        let glyph = state.reply_spinner().glyph();
        assert_eq!(
            text,
            format!("Bot: Echo\nYou: hi\nthere\nfriend\nBot:\nhello\n\n\n{glyph}")
        );
    }

    #[test]
    fn test_typed_text_replaces_placeholder() {
        let mut state = chatting();
        state.input.handle_key(crate::Key::Char('h'));
        match Renderer::default().render(&state) {
            View::Conversation {
                footer: Footer::Input { value, cursor, .. },
                ..
            } => {
                assert_eq!(value, "h");
                assert_eq!(cursor, 1);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_error_overrides_every_screen() {
        let mut state = chatting();
        state.transcript.push_user("hi");
        state.set_error("Sarufi returned 500: boom".to_string());
        assert_eq!(
            Renderer::default().render(&state),
            View::Error("Sarufi returned 500: boom".to_string())
        );
    }

    #[test]
    fn test_quit_renders_empty() {
        let mut state = chatting();
        state.set_error("ignored".to_string());
        state.quit = true;
        assert_eq!(Renderer::default().render_text(&state), "");
    }

    #[test]
    fn test_render_keeps_every_entry_in_order() {
        let mut state = chatting();
        for n in 0..4 {
            state.transcript.push_user(format!("q{n}"));
            state.transcript.push_bot(format!("a{n}"));
        }
        match Renderer::default().render(&state) {
            View::Conversation { entries, .. } => {
                let texts: Vec<_> = entries.into_iter().map(|e| e.text).collect();
                assert_eq!(texts, state.transcript().lines());
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }
}

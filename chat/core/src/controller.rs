//! Interaction Controller - The Client State Machine
//!
//! The controller owns the [`SessionState`] and is the only place it
//! changes. Each [`Event`] moves the session between screens and may produce
//! [`Task`]s; the caller hands those to the [`TaskRunner`](crate::TaskRunner),
//! whose completions come back as further events.
//!
//! # Transitions
//!
//! ```text
//!  Authenticating ──auth ok──► ListingBots ──enter + bot loaded──► MessagingBot
//!        │                        ▲    │                            │     ▲
//!    auth err                 ctrl+b   bot load err             enter   reply
//!   (error view)                  │    (error view)               │   (ok or err)
//!                                 └───────────────── MessagingBot ▼     │
//!                                                        WaitingForResponse
//! ```
//!
//! Quit (Ctrl+C or Esc) is accepted on every screen. Once a pending error is
//! set it replaces every screen, and only quit is still honoured.

use crate::error::GatewayError;
use crate::events::{Event, Key};
use crate::gateway::{Bot, BotSummary};
use crate::session::{Screen, SessionState};
use crate::tasks::Task;

/// Drives the session from events
#[derive(Debug, Default)]
pub struct InteractionController {
    state: SessionState,
}

impl InteractionController {
    /// Create a controller on the `Authenticating` screen
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the session
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the event loop should stop
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.state.quit
    }

    /// Tasks to launch when the client starts
    #[must_use]
    pub fn start(&self) -> Vec<Task> {
        vec![Task::Authenticate]
    }

    /// Apply one event and return the tasks it schedules
    pub fn handle_event(&mut self, event: Event) -> Vec<Task> {
        if self.state.quit {
            tracing::debug!(event = event.name(), "Ignoring event after quit");
            return Vec::new();
        }

        let before = self.state.screen;
        let tasks = match event {
            Event::KeyPressed(key) => self.handle_key(key),
            Event::AuthenticationCompleted(result) => {
                self.on_authenticated(result);
                Vec::new()
            }
            Event::BotLoaded(result) => {
                self.on_bot_loaded(result);
                Vec::new()
            }
            Event::BotReplyCompleted(result) => {
                self.on_reply(result);
                Vec::new()
            }
            Event::TimerTick => {
                self.state.auth_spinner.tick();
                self.state.reply_spinner.tick();
                Vec::new()
            }
        };

        if before != self.state.screen {
            tracing::debug!(from = ?before, to = ?self.state.screen, "Screen transition");
        }
        debug_assert!(self.state.is_consistent());

        tasks
    }

    /// Route a key press
    fn handle_key(&mut self, key: Key) -> Vec<Task> {
        if key.is_quit() {
            tracing::info!("Quit requested");
            self.state.quit = true;
            return Vec::new();
        }

        if self.state.pending_error.is_some() {
            return Vec::new();
        }

        match (self.state.screen, key) {
            (Screen::MessagingBot, key) if key.is_back() => {
                self.state.input.blur();
                self.state.screen = Screen::ListingBots;
                Vec::new()
            }
            (Screen::ListingBots, Key::Enter) => self.select_bot(),
            (Screen::MessagingBot, Key::Enter) => self.submit_message(),
            (Screen::ListingBots, key) => {
                if self.state.loading_bot.is_none() {
                    self.state.bots.handle_key(key);
                }
                Vec::new()
            }
            (Screen::MessagingBot, key) => {
                self.state.input.handle_key(key);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Enter on the bot list: fetch the highlighted bot
    fn select_bot(&mut self) -> Vec<Task> {
        if self.state.loading_bot.is_some() {
            return Vec::new();
        }
        let Some(id) = self.state.bots.selected_id() else {
            return Vec::new();
        };

        tracing::debug!(bot_id = id, "Loading bot");
        self.state.loading_bot = Some(id);
        vec![Task::LoadBot(id)]
    }

    /// Enter in the chat: send the typed message
    fn submit_message(&mut self) -> Vec<Task> {
        if self.state.input.value().trim().is_empty() {
            return Vec::new();
        }
        let Some(bot) = self.state.selected_bot.clone() else {
            return Vec::new();
        };

        let text = self.state.input.take();
        self.state.transcript.push_user(text.clone());
        self.state.screen = Screen::WaitingForResponse;

        vec![Task::SendMessage { bot, text }]
    }

    fn on_authenticated(&mut self, result: Result<Vec<BotSummary>, GatewayError>) {
        if self.state.screen != Screen::Authenticating {
            tracing::warn!(screen = ?self.state.screen, "Ignoring late authentication result");
            return;
        }

        match result {
            Ok(bots) => {
                tracing::info!(count = bots.len(), "Bot catalog loaded");
                self.state.bots.set_items(bots);
                self.state.screen = Screen::ListingBots;
            }
            Err(e) => {
                tracing::warn!("Authentication failed: {}", e);
                self.state.set_error(e.to_string());
            }
        }
    }

    fn on_bot_loaded(&mut self, result: Result<Bot, GatewayError>) {
        if self.state.loading_bot.take().is_none() || self.state.screen != Screen::ListingBots {
            tracing::warn!(screen = ?self.state.screen, "Ignoring unexpected bot record");
            return;
        }

        match result {
            Ok(bot) => {
                tracing::info!(bot_id = bot.id, kind = ?bot.kind(), "Chatting with {}", bot.name);
                self.state.enter_messaging(bot);
            }
            Err(e) => {
                tracing::warn!("Loading bot failed: {}", e);
                self.state.set_error(e.to_string());
            }
        }
    }

    fn on_reply(&mut self, result: Result<String, GatewayError>) {
        if self.state.screen != Screen::WaitingForResponse {
            tracing::warn!(screen = ?self.state.screen, "Ignoring unexpected bot reply");
            return;
        }

        match result {
            Ok(text) => self.state.transcript.push_bot(text),
            Err(e) => {
                tracing::warn!("Sending message failed: {}", e);
                self.state.set_error(e.to_string());
            }
        }
        self.state.screen = Screen::MessagingBot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn network_error() -> GatewayError {
        GatewayError::Status {
            status: 503,
            message: "Service Unavailable".to_string(),
        }
    }

    fn echo_catalog() -> Vec<BotSummary> {
        vec![BotSummary::new(1, "Echo", "repeats you")]
    }

    fn listing() -> InteractionController {
        let mut controller = InteractionController::new();
        controller.handle_event(Event::AuthenticationCompleted(Ok(echo_catalog())));
        controller
    }

    fn messaging() -> InteractionController {
        let mut controller = listing();
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::BotLoaded(Ok(Bot::new(1, "Echo", ""))));
        controller
    }

    fn type_text(controller: &mut InteractionController, text: &str) {
        for c in text.chars() {
            controller.handle_event(Event::KeyPressed(Key::Char(c)));
        }
    }

    #[test]
    fn test_start_schedules_authentication() {
        let controller = InteractionController::new();
        assert_eq!(controller.start(), vec![Task::Authenticate]);
        assert_eq!(controller.state().screen(), Screen::Authenticating);
    }

    #[test]
    fn test_authentication_success_lists_bots() {
        let controller = listing();
        assert_eq!(controller.state().screen(), Screen::ListingBots);
        assert_eq!(controller.state().bots().items(), echo_catalog().as_slice());
    }

    #[test]
    fn test_authentication_failure_sets_error() {
        let mut controller = InteractionController::new();
        controller.handle_event(Event::AuthenticationCompleted(Err(network_error())));
        assert_eq!(controller.state().screen(), Screen::Authenticating);
        assert_eq!(
            controller.state().pending_error(),
            Some("Sarufi returned 503: Service Unavailable")
        );
    }

    #[test]
    fn test_quit_from_any_screen() {
        for key in [Key::Esc, Key::Ctrl('c')] {
            let mut controller = InteractionController::new();
            controller.handle_event(Event::KeyPressed(key));
            assert!(controller.should_quit());

            let mut controller = messaging();
            controller.handle_event(Event::KeyPressed(key));
            assert!(controller.should_quit());
        }
    }

    #[test]
    fn test_events_after_quit_are_ignored() {
        let mut controller = InteractionController::new();
        controller.handle_event(Event::KeyPressed(Key::Esc));
        controller.handle_event(Event::AuthenticationCompleted(Ok(echo_catalog())));
        assert_eq!(controller.state().screen(), Screen::Authenticating);
    }

    #[test]
    fn test_enter_on_list_schedules_bot_fetch() {
        let mut controller = listing();
        let tasks = controller.handle_event(Event::KeyPressed(Key::Enter));
        assert_eq!(tasks, vec![Task::LoadBot(1)]);
        assert_eq!(controller.state().loading_bot(), Some(1));
        assert_eq!(controller.state().screen(), Screen::ListingBots);

        // A second Enter while the fetch is in flight does nothing
        let tasks = controller.handle_event(Event::KeyPressed(Key::Enter));
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_enter_on_empty_list_is_ignored() {
        let mut controller = InteractionController::new();
        controller.handle_event(Event::AuthenticationCompleted(Ok(Vec::new())));
        let tasks = controller.handle_event(Event::KeyPressed(Key::Enter));
        assert!(tasks.is_empty());
        assert_eq!(controller.state().screen(), Screen::ListingBots);
    }

    #[test]
    fn test_bot_loaded_enters_messaging() {
        let controller = messaging();
        let state = controller.state();
        assert_eq!(state.screen(), Screen::MessagingBot);
        assert_eq!(state.selected_bot().map(|b| b.name.as_str()), Some("Echo"));
        assert!(state.transcript().is_empty());
        assert!(state.input().is_focused());
        assert_eq!(state.loading_bot(), None);
    }

    #[test]
    fn test_bot_load_failure_stays_on_list_with_error() {
        let mut controller = listing();
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::BotLoaded(Err(network_error())));
        assert_eq!(controller.state().screen(), Screen::ListingBots);
        assert!(controller.state().pending_error().is_some());
        assert_eq!(controller.state().loading_bot(), None);
    }

    #[test]
    fn test_unexpected_bot_record_ignored() {
        let mut controller = listing();
        controller.handle_event(Event::BotLoaded(Ok(Bot::new(9, "Stray", ""))));
        assert_eq!(controller.state().screen(), Screen::ListingBots);
        assert!(controller.state().selected_bot().is_none());
    }

    #[test]
    fn test_submit_message_and_receive_reply() {
        let mut controller = messaging();
        type_text(&mut controller, "hi");
        let tasks = controller.handle_event(Event::KeyPressed(Key::Enter));

        assert_eq!(
            tasks,
            vec![Task::SendMessage {
                bot: Bot::new(1, "Echo", ""),
                text: "hi".to_string(),
            }]
        );
        assert_eq!(controller.state().transcript().lines(), vec!["You: hi"]);
        assert_eq!(controller.state().screen(), Screen::WaitingForResponse);
        assert_eq!(controller.state().input().value(), "");

        controller.handle_event(Event::BotReplyCompleted(Ok("hello".to_string())));
        assert_eq!(
            controller.state().transcript().lines(),
            vec!["You: hi", "Bot: hello"]
        );
        assert_eq!(controller.state().screen(), Screen::MessagingBot);
    }

    #[test]
    fn test_empty_message_not_sent() {
        let mut controller = messaging();
        assert!(controller
            .handle_event(Event::KeyPressed(Key::Enter))
            .is_empty());
        type_text(&mut controller, "   ");
        assert!(controller
            .handle_event(Event::KeyPressed(Key::Enter))
            .is_empty());
        assert_eq!(controller.state().screen(), Screen::MessagingBot);
        assert!(controller.state().transcript().is_empty());
    }

    #[test]
    fn test_only_one_send_in_flight() {
        let mut controller = messaging();
        type_text(&mut controller, "one");
        assert_eq!(controller.handle_event(Event::KeyPressed(Key::Enter)).len(), 1);

        // Typing and Enter while waiting are not accepted
        type_text(&mut controller, "two");
        assert!(controller
            .handle_event(Event::KeyPressed(Key::Enter))
            .is_empty());
        assert_eq!(controller.state().input().value(), "");
        assert_eq!(controller.state().transcript().len(), 1);
    }

    #[test]
    fn test_reply_failure_returns_to_messaging_with_error() {
        let mut controller = messaging();
        type_text(&mut controller, "hi");
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::BotReplyCompleted(Err(network_error())));

        assert_eq!(controller.state().screen(), Screen::MessagingBot);
        assert_eq!(
            controller.state().pending_error(),
            Some("Sarufi returned 503: Service Unavailable")
        );
        assert_eq!(controller.state().transcript().lines(), vec!["You: hi"]);
    }

    #[test]
    fn test_keys_ignored_once_error_is_set() {
        let mut controller = messaging();
        type_text(&mut controller, "hi");
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::BotReplyCompleted(Err(network_error())));

        type_text(&mut controller, "again");
        assert!(controller
            .handle_event(Event::KeyPressed(Key::Enter))
            .is_empty());
        assert_eq!(controller.state().input().value(), "");

        controller.handle_event(Event::KeyPressed(Key::Esc));
        assert!(controller.should_quit());
    }

    #[test]
    fn test_back_key_returns_to_list() {
        let mut controller = messaging();
        controller.handle_event(Event::KeyPressed(Key::Ctrl('b')));
        assert_eq!(controller.state().screen(), Screen::ListingBots);
        assert!(!controller.state().input().is_focused());
    }

    #[test]
    fn test_back_key_ignored_while_waiting() {
        let mut controller = messaging();
        type_text(&mut controller, "hi");
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::KeyPressed(Key::Ctrl('b')));
        assert_eq!(controller.state().screen(), Screen::WaitingForResponse);
    }

    #[test]
    fn test_reselecting_bot_resets_transcript() {
        let mut controller = messaging();
        type_text(&mut controller, "hi");
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::BotReplyCompleted(Ok("hello".to_string())));
        controller.handle_event(Event::KeyPressed(Key::Ctrl('b')));
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::BotLoaded(Ok(Bot::new(1, "Echo", ""))));

        assert_eq!(controller.state().screen(), Screen::MessagingBot);
        assert!(controller.state().transcript().is_empty());
    }

    #[test]
    fn test_list_navigation_delegated() {
        let mut controller = InteractionController::new();
        controller.handle_event(Event::AuthenticationCompleted(Ok(vec![
            BotSummary::new(1, "Echo", ""),
            BotSummary::new(2, "Shop", ""),
        ])));
        controller.handle_event(Event::KeyPressed(Key::Down));
        assert_eq!(controller.state().bots().selected_id(), Some(2));
        let tasks = controller.handle_event(Event::KeyPressed(Key::Enter));
        assert_eq!(tasks, vec![Task::LoadBot(2)]);
    }

    #[test]
    fn test_enter_selects_from_filtered_rows() {
        let mut controller = InteractionController::new();
        controller.handle_event(Event::AuthenticationCompleted(Ok(vec![
            BotSummary::new(1, "Echo", ""),
            BotSummary::new(2, "Shop", ""),
            BotSummary::new(3, "Clinic", ""),
        ])));
        for c in "/CLI".chars() {
            controller.handle_event(Event::KeyPressed(Key::Char(c)));
        }

        assert_eq!(controller.state().bots().filter(), Some("CLI"));
        let tasks = controller.handle_event(Event::KeyPressed(Key::Enter));
        assert_eq!(tasks, vec![Task::LoadBot(3)]);
    }

    #[test]
    fn test_enter_ignored_when_filter_matches_nothing() {
        let mut controller = listing();
        for c in "/zz".chars() {
            controller.handle_event(Event::KeyPressed(Key::Char(c)));
        }

        assert!(controller
            .handle_event(Event::KeyPressed(Key::Enter))
            .is_empty());
        assert_eq!(controller.state().screen(), Screen::ListingBots);
        assert_eq!(controller.state().loading_bot(), None);
    }

    #[test]
    fn test_esc_quits_while_filtering() {
        let mut controller = listing();
        controller.handle_event(Event::KeyPressed(Key::Char('/')));
        controller.handle_event(Event::KeyPressed(Key::Esc));
        assert!(controller.should_quit());
    }

    #[test]
    fn test_filter_keys_ignored_while_loading_bot() {
        let mut controller = listing();
        controller.handle_event(Event::KeyPressed(Key::Enter));
        controller.handle_event(Event::KeyPressed(Key::Char('/')));
        assert!(!controller.state().bots().is_filtering());
    }

    #[test]
    fn test_keys_ignored_while_authenticating() {
        let mut controller = InteractionController::new();
        assert!(controller
            .handle_event(Event::KeyPressed(Key::Enter))
            .is_empty());
        controller.handle_event(Event::KeyPressed(Key::Char('x')));
        assert_eq!(controller.state().screen(), Screen::Authenticating);
        assert_eq!(controller.state().input().value(), "");
    }

    #[test]
    fn test_timer_tick_only_advances_spinners() {
        let mut controller = messaging();
        let auth_before = controller.state().auth_spinner().glyph();
        let reply_before = controller.state().reply_spinner().glyph();
        let tasks = controller.handle_event(Event::TimerTick);

        assert!(tasks.is_empty());
        assert_eq!(controller.state().screen(), Screen::MessagingBot);
        assert_ne!(controller.state().auth_spinner().glyph(), auth_before);
        assert_ne!(controller.state().reply_spinner().glyph(), reply_before);
    }

    #[test]
    fn test_transcript_has_two_entries_per_exchange() {
        let mut controller = messaging();
        for n in 0..5 {
            type_text(&mut controller, &format!("message {n}"));
            controller.handle_event(Event::KeyPressed(Key::Enter));
            controller.handle_event(Event::BotReplyCompleted(Ok(format!("reply {n}"))));
        }
        let lines = controller.state().transcript().lines();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "You: message 0");
        assert_eq!(lines[9], "Bot: reply 4");
    }
}

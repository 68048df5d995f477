//! Main Application
//!
//! The App is a thin display client around the chat core:
//! 1. Converts terminal key events to core events
//! 2. Feeds every event to the `InteractionController`
//! 3. Launches the tasks the controller returns on the `TaskRunner`
//! 4. Draws the `View` rendered from the session state

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use sarufi_chat_core::{
    ClientConfig, Event, InteractionController, RemoteBotGateway, Renderer, TaskRunner, View,
};

use crate::input::map_key;
use crate::ui;

/// Capacity of the completion channel
const EVENT_BUFFER: usize = 32;

/// Main application state
pub struct App {
    /// Session state machine
    controller: InteractionController,
    /// Session state to view
    renderer: Renderer,
    /// Runs gateway calls off the event loop
    runner: TaskRunner,
    /// Completions posted by the runner
    events: mpsc::Receiver<Event>,
    /// Spinner animation period
    tick_interval: Duration,
}

impl App {
    /// Create an App talking to `gateway`
    pub fn new(gateway: Arc<dyn RemoteBotGateway>, config: &ClientConfig) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        Self {
            controller: InteractionController::new(),
            renderer: Renderer::new(config.wrap_width),
            runner: TaskRunner::new(gateway, tx, config.channel.clone()),
            events: rx,
            tick_interval: config.tick_interval,
        }
    }

    /// Session state machine
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Launch the startup tasks
    pub fn start(&mut self) {
        tracing::info!("Starting Sarufi TUI");
        self.runner.launch_all(self.controller.start());
    }

    /// Apply one event and launch whatever it schedules
    pub fn handle(&mut self, event: Event) {
        let tasks = self.controller.handle_event(event);
        self.runner.launch_all(tasks);
    }

    /// Wait for the next task completion and apply it
    ///
    /// Returns `false` once no completion can arrive anymore.
    pub async fn handle_next_completion(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.handle(event);
                true
            }
            None => false,
        }
    }

    /// View of the current state
    #[must_use]
    pub fn view(&self) -> View {
        self.renderer.render(self.controller.state())
    }

    /// View of the current state for a terminal `columns` wide
    ///
    /// The transcript wraps at the configured width, or narrower when the
    /// terminal is.
    #[must_use]
    pub fn view_for_width(&self, columns: u16) -> View {
        let columns = usize::from(columns.max(1));
        if columns >= self.renderer.wrap_width() {
            return self.view();
        }
        Renderer::new(columns).render(self.controller.state())
    }

    /// Draw the current view
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written.
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let view = self.view_for_width(terminal.size()?.width);
        terminal.draw(|frame| ui::draw(frame, &view))?;
        Ok(())
    }

    /// Main event loop
    ///
    /// Runs until the user quits or the terminal input stream ends. Tasks
    /// still in flight are abandoned.
    ///
    /// # Errors
    ///
    /// Returns an error if reading terminal input or drawing fails.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut term_events = EventStream::new();

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.start();
        self.draw(terminal)?;

        while !self.controller.should_quit() {
            tokio::select! {
                biased;

                // Terminal events first so quit is never starved
                maybe_event = term_events.next() => match maybe_event {
                    Some(Ok(TermEvent::Key(key))) => {
                        if let Some(key) = map_key(key) {
                            self.handle(Event::KeyPressed(key));
                        }
                    }
                    // Resize and others only need a redraw
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        tracing::debug!("Terminal input closed");
                        break;
                    }
                },

                Some(event) = self.events.recv() => self.handle(event),

                _ = ticker.tick() => self.handle(Event::TimerTick),
            }

            self.draw(terminal)?;
        }

        tracing::info!(in_flight = self.runner.in_flight(), "Sarufi TUI exiting");
        Ok(())
    }
}

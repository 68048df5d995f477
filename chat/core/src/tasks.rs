//! Task Runner
//!
//! Gateway calls run on spawned tokio tasks so the event loop never waits on
//! the network. Each launched [`Task`] posts exactly one completion [`Event`]
//! into the controller's channel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::Event;
use crate::gateway::{Bot, BotId, BotReply, RemoteBotGateway};

/// Asynchronous work requested by the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// List the user's bots; emits [`Event::AuthenticationCompleted`]
    Authenticate,
    /// Fetch one bot record; emits [`Event::BotLoaded`]
    LoadBot(BotId),
    /// Send a message; emits [`Event::BotReplyCompleted`]
    SendMessage {
        /// Recipient
        bot: Bot,
        /// Message text
        text: String,
    },
}

impl Task {
    /// Short name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authenticate => "Authenticate",
            Self::LoadBot(_) => "LoadBot",
            Self::SendMessage { .. } => "SendMessage",
        }
    }
}

/// Spawns tasks against a shared gateway
#[derive(Clone)]
pub struct TaskRunner {
    gateway: Arc<dyn RemoteBotGateway>,
    events: mpsc::Sender<Event>,
    channel: String,
    in_flight: Arc<AtomicUsize>,
}

impl TaskRunner {
    /// Create a runner posting completions to `events`
    ///
    /// `channel` is the messaging channel sent with every message.
    pub fn new(
        gateway: Arc<dyn RemoteBotGateway>,
        events: mpsc::Sender<Event>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            events,
            channel: channel.into(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of tasks that have not yet finished
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Spawn one task
    pub fn launch(&self, task: Task) -> JoinHandle<()> {
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();
        let channel = self.channel.clone();
        let in_flight = Arc::clone(&self.in_flight);

        let count = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(task = task.kind(), in_flight = count, "Launching task");

        tokio::spawn(async move {
            let kind = task.kind();
            let event = execute(&*gateway, &channel, task).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);

            if events.send(event).await.is_err() {
                tracing::debug!(task = kind, "Event channel closed, dropping completion");
            }
        })
    }

    /// Spawn every task in order
    pub fn launch_all(&self, tasks: impl IntoIterator<Item = Task>) -> Vec<JoinHandle<()>> {
        tasks.into_iter().map(|task| self.launch(task)).collect()
    }
}

async fn execute(gateway: &dyn RemoteBotGateway, channel: &str, task: Task) -> Event {
    match task {
        Task::Authenticate => Event::AuthenticationCompleted(gateway.authenticate().await),
        Task::LoadBot(id) => Event::BotLoaded(gateway.get_bot(id).await),
        Task::SendMessage { bot, text } => Event::BotReplyCompleted(
            gateway
                .respond(&bot, &text, channel)
                .await
                .and_then(BotReply::into_text),
        ),
    }
}

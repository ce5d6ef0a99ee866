//! Shared world state for message tagging BDD scenarios.

use std::sync::Arc;

use colloquy::message::{
    adapters::memory::InMemoryMessageRepository,
    domain::{ConversationId, Message},
    services::{MessageStore, MessageStoreResult},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Store type used by the BDD world.
pub type TestMessageStore = MessageStore<InMemoryMessageRepository, DefaultClock>;

/// Scenario world for message tagging behaviour tests.
pub struct MessageTaggingWorld {
    pub store: TestMessageStore,
    pub conversation_id: ConversationId,
    pub last_message: Option<Message>,
    pub last_result: Option<MessageStoreResult<Message>>,
    pub last_search: Option<Vec<Message>>,
}

impl MessageTaggingWorld {
    /// Creates a world with an empty store and a fresh conversation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: MessageStore::new(
                Arc::new(InMemoryMessageRepository::new()),
                Arc::new(DefaultClock),
            ),
            conversation_id: ConversationId::new(),
            last_message: None,
            last_result: None,
            last_search: None,
        }
    }

    /// Returns the message most recently created or updated.
    ///
    /// # Errors
    ///
    /// Returns an error when no message has been created yet.
    pub fn current_message(&self) -> Result<&Message, eyre::Report> {
        self.last_message
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing message in scenario world"))
    }
}

impl Default for MessageTaggingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MessageTaggingWorld {
    MessageTaggingWorld::default()
}

/// Splits a comma-separated step argument into tags.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! In-memory implementation of the [`MessageRepository`] port.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::message::{
    domain::{Message, MessageId, PersistedMessageData, Tag, TagSet},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};

/// Thread-safe in-memory message repository.
///
/// Each call holds the internal lock for its whole duration, so every
/// operation is atomic with respect to the others.
///
/// # Example
///
/// ```
/// use colloquy::message::adapters::memory::InMemoryMessageRepository;
///
/// let repo = InMemoryMessageRepository::new();
/// assert!(repo.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    state: Arc<RwLock<InMemoryMessageState>>,
}

#[derive(Debug, Default)]
struct InMemoryMessageState {
    messages: HashMap<MessageId, Message>,
    tag_index: HashMap<Tag, BTreeSet<MessageId>>,
}

impl InMemoryMessageRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .map(|state| state.messages.len())
            .unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> MessageRepositoryError {
    MessageRepositoryError::persistence(std::io::Error::other(format!("lock poisoned: {err}")))
}

fn index_tags(state: &mut InMemoryMessageState, message: &Message) {
    for tag in message.tags() {
        state
            .tag_index
            .entry(tag.clone())
            .or_default()
            .insert(message.id());
    }
}

/// Removes a message ID from the tag index, dropping tags left with no
/// messages.
fn unindex_tags(state: &mut InMemoryMessageState, message: &Message) {
    for tag in message.tags() {
        if let Some(ids) = state.tag_index.get_mut(tag) {
            ids.remove(&message.id());
            if ids.is_empty() {
                state.tag_index.remove(tag);
            }
        }
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.messages.contains_key(&message.id()) {
            return Err(MessageRepositoryError::DuplicateMessage(message.id()));
        }

        index_tags(&mut state, message);
        state.messages.insert(message.id(), message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.messages.get(&id).cloned())
    }

    async fn update(&self, message: &Message) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let stored = state
            .messages
            .get(&message.id())
            .ok_or_else(|| MessageRepositoryError::NotFound(message.id()))?
            .clone();
        let updated = apply_mutable_fields(&stored, message);

        unindex_tags(&mut state, &stored);
        index_tags(&mut state, &updated);
        state.messages.insert(updated.id(), updated);
        Ok(())
    }

    async fn find_by_any_tag(&self, tags: &TagSet) -> MessageRepositoryResult<Vec<Message>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let ids: BTreeSet<MessageId> = tags
            .iter()
            .filter_map(|tag| state.tag_index.get(tag))
            .flatten()
            .copied()
            .collect();

        let mut matches: Vec<Message> = ids
            .iter()
            .filter_map(|id| state.messages.get(id).cloned())
            .collect();
        matches.sort_by_key(|message| (message.created_at(), message.id()));
        Ok(matches)
    }
}

/// Copies the fields an update may change onto the stored record.
fn apply_mutable_fields(stored: &Message, changes: &Message) -> Message {
    Message::from_persisted(PersistedMessageData {
        id: stored.id(),
        conversation_id: stored.conversation_id(),
        sender_id: stored.sender_id(),
        text: stored.text().clone(),
        tags: changes.tags().clone(),
        likes: stored.likes().to_vec(),
        reactions: stored.reactions().to_vec(),
        resolved: stored.is_resolved(),
        deleted: stored.is_deleted() || changes.is_deleted(),
        created_at: stored.created_at(),
        updated_at: changes.updated_at(),
    })
}

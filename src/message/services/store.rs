//! Message store service: creation, lookup, soft deletion, and tagging.

use crate::message::{
    domain::{ConversationId, Message, MessageDomainError, MessageId, MessageText, TagSet, UserId},
    ports::{MessageRepository, MessageRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a message.
///
/// The sender is not part of the payload; callers pass it from their
/// authenticated context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMessageRequest {
    conversation_id: ConversationId,
    text: String,
}

impl CreateMessageRequest {
    /// Creates a request for a typed conversation identifier.
    #[must_use]
    pub fn new(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            text: text.into(),
        }
    }

    /// Creates a request from a raw conversation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::InvalidIdentifier`] when the identifier is
    /// malformed.
    pub fn from_raw(
        conversation_id: &str,
        text: impl Into<String>,
    ) -> Result<Self, MessageDomainError> {
        Ok(Self::new(ConversationId::parse_str(conversation_id)?, text))
    }

    /// Returns the target conversation.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }
}

/// Request payload for the tag mutation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMessageRequest {
    message_id: MessageId,
    conversation_id: ConversationId,
    tags: Vec<String>,
}

impl TagMessageRequest {
    /// Creates a tag request.
    #[must_use]
    pub fn new(
        message_id: MessageId,
        conversation_id: ConversationId,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            message_id,
            conversation_id,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a tag request from raw identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::InvalidIdentifier`] when either
    /// identifier is malformed.
    pub fn from_raw(
        message_id: &str,
        conversation_id: &str,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, MessageDomainError> {
        Ok(Self::new(
            MessageId::parse_str(message_id)?,
            ConversationId::parse_str(conversation_id)?,
            tags,
        ))
    }

    /// Returns the target message.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Returns the conversation the caller believes owns the message.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }
}

/// Service-level errors for message store operations.
#[derive(Debug, Error)]
pub enum MessageStoreError {
    /// Input was malformed or missing.
    #[error(transparent)]
    Validation(#[from] MessageDomainError),

    /// No message matches the identifier.
    #[error("message not found: {0}")]
    NotFound(String),

    /// The supplied conversation does not own the message.
    #[error(
        "message {message_id} belongs to conversation {actual}, not {supplied}"
    )]
    Conflict {
        /// The targeted message.
        message_id: MessageId,
        /// The conversation supplied by the caller.
        supplied: ConversationId,
        /// The conversation stored on the message.
        actual: ConversationId,
    },

    /// The storage backend failed or rejected the operation.
    #[error(transparent)]
    Persistence(MessageRepositoryError),
}

impl From<MessageRepositoryError> for MessageStoreError {
    fn from(err: MessageRepositoryError) -> Self {
        match err {
            MessageRepositoryError::NotFound(id) => Self::NotFound(id.to_string()),
            other => Self::Persistence(other),
        }
    }
}

/// Result type for message store operations.
pub type MessageStoreResult<T> = Result<T, MessageStoreError>;

/// Message store orchestration service.
///
/// Holds the repository for the lifetime of the process. Tag mutations are a
/// read-modify-write over the repository, so concurrent tag writes to the
/// same message resolve as last writer wins.
#[derive(Clone)]
pub struct MessageStore<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> MessageStore<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new message store.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new message from `sender_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Validation`] when the text is blank and
    /// [`MessageStoreError::Persistence`] when the repository rejects the
    /// write.
    pub async fn create(
        &self,
        request: CreateMessageRequest,
        sender_id: UserId,
    ) -> MessageStoreResult<Message> {
        let text = MessageText::new(request.text)?;
        let message = Message::new(request.conversation_id, sender_id, text, &*self.clock);
        self.repository.store(&message).await?;
        info!(
            message_id = %message.id(),
            conversation_id = %message.conversation_id(),
            sender_id = %sender_id,
            "message created"
        );
        Ok(message)
    }

    /// Retrieves a message by its string identifier, deleted or not.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::NotFound`] when the identifier is
    /// malformed or unknown.
    pub async fn get_message(&self, id: &str) -> MessageStoreResult<Message> {
        let Ok(message_id) = MessageId::parse_str(id) else {
            debug!(raw_id = id, "rejected malformed message identifier");
            return Err(MessageStoreError::NotFound(id.to_owned()));
        };
        self.load(message_id).await
    }

    /// Soft-deletes a message and returns the updated record.
    ///
    /// Deleting an already-deleted message succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::NotFound`] when the message does not exist.
    pub async fn delete(&self, id: MessageId) -> MessageStoreResult<Message> {
        let mut message = self.load(id).await?;
        let was_deleted = message.is_deleted();
        message.mark_deleted(&*self.clock);
        self.repository.update(&message).await?;
        info!(message_id = %id, was_deleted, "message soft-deleted");
        Ok(message)
    }

    /// Merges the requested tags into the message's tag set.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Validation`] for blank tags,
    /// [`MessageStoreError::NotFound`] for unknown messages, and
    /// [`MessageStoreError::Conflict`] when the conversation does not match.
    pub async fn add_tags_to_message(
        &self,
        request: TagMessageRequest,
    ) -> MessageStoreResult<Message> {
        let tags = TagSet::parse(request.tags)?;
        let mut message = self
            .load_in_conversation(request.message_id, request.conversation_id)
            .await?;
        message.add_tags(&tags, &*self.clock);
        self.repository.update(&message).await?;
        debug!(
            message_id = %message.id(),
            tag_count = message.tags().len(),
            "tags merged"
        );
        Ok(message)
    }

    /// Replaces the message's tag set with the requested tags.
    ///
    /// # Errors
    ///
    /// Same as [`MessageStore::add_tags_to_message`].
    pub async fn update_tags_on_message(
        &self,
        request: TagMessageRequest,
    ) -> MessageStoreResult<Message> {
        let tags = TagSet::parse(request.tags)?;
        let mut message = self
            .load_in_conversation(request.message_id, request.conversation_id)
            .await?;
        message.replace_tags(tags, &*self.clock);
        self.repository.update(&message).await?;
        debug!(
            message_id = %message.id(),
            tag_count = message.tags().len(),
            "tags replaced"
        );
        Ok(message)
    }

    /// Returns every message carrying at least one of `tags`.
    ///
    /// Soft-deleted messages are included.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Validation`] when `tags` is empty or holds
    /// a blank tag, and [`MessageStoreError::Persistence`] when the query
    /// fails.
    pub async fn search_messages_by_tags(
        &self,
        tags: &[String],
    ) -> MessageStoreResult<Vec<Message>> {
        let query = TagSet::parse(tags.iter().cloned())?;
        if query.is_empty() {
            return Err(MessageDomainError::EmptyTagQuery.into());
        }
        let matches = self.repository.find_by_any_tag(&query).await?;
        debug!(
            query_tags = query.len(),
            matches = matches.len(),
            "tag search completed"
        );
        Ok(matches)
    }

    async fn load(&self, id: MessageId) -> MessageStoreResult<Message> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| MessageStoreError::NotFound(id.to_string()))
    }

    async fn load_in_conversation(
        &self,
        id: MessageId,
        conversation_id: ConversationId,
    ) -> MessageStoreResult<Message> {
        let message = self.load(id).await?;
        if message.conversation_id() != conversation_id {
            warn!(
                message_id = %id,
                supplied = %conversation_id,
                actual = %message.conversation_id(),
                "tag mutation rejected: conversation mismatch"
            );
            return Err(MessageStoreError::Conflict {
                message_id: id,
                supplied: conversation_id,
                actual: message.conversation_id(),
            });
        }
        Ok(message)
    }
}

//! Repository port for message storage, lookup, and tag search.

use crate::message::domain::{Message, MessageId, TagSet};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message repository operations.
pub type MessageRepositoryResult<T> = Result<T, MessageRepositoryError>;

/// Message persistence contract.
///
/// Implementations must ensure:
/// - message IDs are unique across the store
/// - `update` never clears a stored `deleted` flag
/// - each call touches a single message record atomically
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::DuplicateMessage`] when the ID is
    /// already stored, or [`MessageRepositoryError::Persistence`] when the
    /// backend rejects the write.
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()>;

    /// Finds a message by identifier.
    ///
    /// Returns `None` when the message does not exist.
    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>>;

    /// Persists the mutable fields of an existing message: tags, the
    /// soft-delete flag, and `updated_at`.
    ///
    /// The stored `deleted` flag is combined with the new one using logical
    /// OR.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::NotFound`] when the message does not
    /// exist.
    async fn update(&self, message: &Message) -> MessageRepositoryResult<()>;

    /// Returns every message whose tags intersect `tags`, deleted or not.
    ///
    /// Results are ordered by creation time, then identifier.
    async fn find_by_any_tag(&self, tags: &TagSet) -> MessageRepositoryResult<Vec<Message>>;
}

/// Errors returned by message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageRepositoryError {
    /// A message with the same identifier already exists.
    #[error("duplicate message identifier: {0}")]
    DuplicateMessage(MessageId),

    /// The message was not found.
    #[error("message not found: {0}")]
    NotFound(MessageId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

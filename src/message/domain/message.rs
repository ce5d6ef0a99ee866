//! Message aggregate root and its lifecycle transitions.

use super::{
    ConversationId, ConversationRef, MessageId, MessageText, Reaction, SenderRef, TagSet, UserId,
};
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Number of fractional-second digits kept on message timestamps.
///
/// `PostgreSQL` stores microseconds, so timestamps are truncated on creation
/// to round-trip exactly through every adapter.
const TIMESTAMP_PRECISION: u16 = 6;

/// A chat message within a conversation.
///
/// # Invariants
///
/// - `id`, `conversation_id`, `sender_id`, `text` and `created_at` never
///   change after creation
/// - `deleted` only moves from `false` to `true`
/// - `updated_at` strictly increases on every mutation
/// - `likes_count()` always equals the number of likes
///
/// # Examples
///
/// ```
/// use colloquy::message::domain::{ConversationId, Message, MessageText, UserId};
/// use mockable::DefaultClock;
///
/// let text = MessageText::new("Hello world").expect("valid text");
/// let message = Message::new(ConversationId::new(), UserId::new(), text, &DefaultClock);
///
/// assert!(message.tags().is_empty());
/// assert_eq!(message.likes_count(), 0);
/// assert!(!message.is_deleted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    conversation_id: ConversationId,
    sender_id: UserId,
    text: MessageText,
    tags: TagSet,
    likes: Vec<UserId>,
    reactions: Vec<Reaction>,
    resolved: bool,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Owning conversation.
    pub conversation_id: ConversationId,
    /// Authoring user.
    pub sender_id: UserId,
    /// Message body.
    pub text: MessageText,
    /// Current tag set.
    pub tags: TagSet,
    /// Users who liked the message, in order.
    pub likes: Vec<UserId>,
    /// Reactions, in order.
    pub reactions: Vec<Reaction>,
    /// Resolution flag.
    pub resolved: bool,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with empty tags, likes and reactions.
    #[must_use]
    pub fn new(
        conversation_id: ConversationId,
        sender_id: UserId,
        text: MessageText,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = storage_timestamp(clock);
        Self {
            id: MessageId::new(),
            conversation_id,
            sender_id,
            text,
            tags: TagSet::new(),
            likes: Vec::new(),
            reactions: Vec::new(),
            resolved: false,
            deleted: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            conversation_id: data.conversation_id,
            sender_id: data.sender_id,
            text: data.text,
            tags: data.tags,
            likes: data.likes,
            reactions: data.reactions,
            resolved: data.resolved,
            deleted: data.deleted,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the owning conversation identifier.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Returns the sender identifier.
    #[must_use]
    pub const fn sender_id(&self) -> UserId {
        self.sender_id
    }

    /// Returns the owning conversation as a reference object.
    #[must_use]
    pub const fn conversation(&self) -> ConversationRef {
        ConversationRef {
            id: self.conversation_id,
        }
    }

    /// Returns the sender as a reference object.
    #[must_use]
    pub const fn sender(&self) -> SenderRef {
        SenderRef { id: self.sender_id }
    }

    /// Returns the message body.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the current tag set.
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Returns the users who liked the message.
    #[must_use]
    pub fn likes(&self) -> &[UserId] {
        &self.likes
    }

    /// Returns the number of likes.
    #[must_use]
    pub fn likes_count(&self) -> usize {
        self.likes.len()
    }

    /// Returns the reactions.
    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Returns whether the message has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Returns whether the message has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the message as deleted.
    ///
    /// Calling this on an already-deleted message keeps it deleted and still
    /// advances `updated_at`. There is no inverse transition.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        self.deleted = true;
        self.touch(clock);
    }

    /// Merges `tags` into the current tag set.
    pub fn add_tags(&mut self, tags: &TagSet, clock: &impl Clock) {
        self.tags.extend_from(tags);
        self.touch(clock);
    }

    /// Replaces the current tag set with `tags`.
    pub fn replace_tags(&mut self, tags: TagSet, clock: &impl Clock) {
        self.tags = tags;
        self.touch(clock);
    }

    /// Advances `updated_at`, stepping past the previous value when the clock
    /// has not moved.
    fn touch(&mut self, clock: &impl Clock) {
        let now = storage_timestamp(clock);
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at
                .checked_add_signed(TimeDelta::microseconds(1))
                .unwrap_or(now)
        };
    }
}

fn storage_timestamp(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(TIMESTAMP_PRECISION)
}

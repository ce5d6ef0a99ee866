//! Client-facing projection of a stored message.

use crate::message::domain::{
    ConversationId, ConversationRef, Message, MessageId, Reaction, SenderRef, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialisable view of a [`Message`] using camelCase field names.
///
/// Conversation and sender appear both as raw identifiers and as reference
/// objects so clients can resolve them lazily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    /// Message identifier.
    pub id: MessageId,
    /// Owning conversation identifier.
    pub conversation_id: ConversationId,
    /// Owning conversation reference.
    pub conversation: ConversationRef,
    /// Sender identifier.
    pub sender_id: UserId,
    /// Sender reference.
    pub sender: SenderRef,
    /// Message body.
    pub text: String,
    /// Tags in lexical order.
    pub tags: Vec<String>,
    /// Users who liked the message.
    pub likes: Vec<UserId>,
    /// Number of likes.
    pub likes_count: usize,
    /// Reactions.
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

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id(),
            conversation_id: message.conversation_id(),
            conversation: message.conversation(),
            sender_id: message.sender_id(),
            sender: message.sender(),
            text: message.text().as_str().to_owned(),
            tags: message.tags().to_strings(),
            likes: message.likes().to_vec(),
            likes_count: message.likes_count(),
            reactions: message.reactions().to_vec(),
            resolved: message.is_resolved(),
            deleted: message.is_deleted(),
            created_at: message.created_at(),
            updated_at: message.updated_at(),
        }
    }
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

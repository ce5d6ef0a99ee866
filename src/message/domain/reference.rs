//! Read-time references to entities owned by other subsystems.
//!
//! These are projections over stored identifiers. The message never embeds
//! conversation or user data.

use super::{ConversationId, UserId};
use serde::{Deserialize, Serialize};

/// Reference to the conversation a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationRef {
    /// Conversation identifier.
    pub id: ConversationId,
}

/// Reference to the user who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenderRef {
    /// Sender identifier.
    pub id: UserId,
}

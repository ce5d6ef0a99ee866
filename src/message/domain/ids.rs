//! Identifier newtypes for messages and the entities they reference.
//!
//! All identifiers wrap UUIDs. Conversations and users are owned by other
//! subsystems, so their identifiers are opaque references here.

use super::MessageDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stored message.
///
/// # Examples
///
/// ```
/// use colloquy::message::domain::MessageId;
///
/// let id = MessageId::new();
/// let parsed = MessageId::parse_str(&id.to_string()).expect("valid identifier");
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a message identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a message identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::InvalidIdentifier`] when `value` is not a
    /// well-formed UUID.
    pub fn parse_str(value: &str) -> Result<Self, MessageDomainError> {
        parse_uuid("message", value).map(Self)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for MessageId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the conversation that owns a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Creates a new random conversation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a conversation identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a conversation identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::InvalidIdentifier`] when `value` is not a
    /// well-formed UUID.
    pub fn parse_str(value: &str) -> Result<Self, MessageDomainError> {
        parse_uuid("conversation", value).map(Self)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for ConversationId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a user, used for message senders and likers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a user identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::InvalidIdentifier`] when `value` is not a
    /// well-formed UUID.
    pub fn parse_str(value: &str) -> Result<Self, MessageDomainError> {
        parse_uuid("user", value).map(Self)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for UserId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_uuid(kind: &'static str, value: &str) -> Result<Uuid, MessageDomainError> {
    Uuid::parse_str(value.trim()).map_err(|_| MessageDomainError::invalid_identifier(kind, value))
}

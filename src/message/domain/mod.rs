//! Domain model for chat message persistence.
//!
//! Pure types with no infrastructure dependencies: the [`Message`] aggregate,
//! its identifiers, validated text and tags, and the read-time references to
//! conversations and senders.

mod error;
mod ids;
mod message;
mod reaction;
mod reference;
mod tags;
mod text;

pub use error::MessageDomainError;
pub use ids::{ConversationId, MessageId, UserId};
pub use message::{Message, PersistedMessageData};
pub use reaction::Reaction;
pub use reference::{ConversationRef, SenderRef};
pub use tags::{Tag, TagSet};
pub use text::MessageText;

//! Reaction records attached to messages.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A user's reaction to a message.
///
/// Reactions are carried and persisted but not mutated by the message store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    /// User who reacted.
    pub user_id: UserId,
    /// Short reaction name, such as `thumbs_up`.
    pub reaction: String,
    /// Unicode rendering of the reaction.
    pub reaction_unicode: String,
}

impl Reaction {
    /// Creates a reaction record.
    #[must_use]
    pub fn new(
        user_id: UserId,
        reaction: impl Into<String>,
        reaction_unicode: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            reaction: reaction.into(),
            reaction_unicode: reaction_unicode.into(),
        }
    }
}

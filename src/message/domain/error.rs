//! Error types for message domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating message domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The message text is empty after trimming.
    #[error("message text must not be empty")]
    EmptyText,

    /// A tag is empty after trimming.
    #[error("tags must not be empty")]
    EmptyTag,

    /// A tag search was requested without any tags.
    #[error("tag search requires at least one tag")]
    EmptyTagQuery,

    /// An identifier could not be parsed.
    #[error("invalid {kind} identifier '{value}'")]
    InvalidIdentifier {
        /// The identifier kind, such as `message` or `conversation`.
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },
}

impl MessageDomainError {
    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            value: value.into(),
        }
    }
}

//! Chat message storage and tagging for Colloquy.
//!
//! Messages are created inside a conversation, looked up by identifier,
//! soft-deleted, and labelled with free-form tags that support any-of search.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Client projections in [`view`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use colloquy::message::adapters::memory::InMemoryMessageRepository;
//! use colloquy::message::domain::{ConversationId, UserId};
//! use colloquy::message::services::{CreateMessageRequest, MessageStore, TagMessageRequest};
//! use mockable::DefaultClock;
//!
//! # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
//! let store = MessageStore::new(
//!     Arc::new(InMemoryMessageRepository::new()),
//!     Arc::new(DefaultClock),
//! );
//! let conversation = ConversationId::new();
//! let message = store
//!     .create(CreateMessageRequest::new(conversation, "Hello"), UserId::new())
//!     .await
//!     .expect("message created");
//!
//! store
//!     .add_tags_to_message(TagMessageRequest::new(message.id(), conversation, ["greeting"]))
//!     .await
//!     .expect("tags added");
//!
//! let found = store
//!     .search_messages_by_tags(&["greeting".to_owned()])
//!     .await
//!     .expect("search succeeds");
//! assert_eq!(found.len(), 1);
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod view;

#[cfg(test)]
mod tests;

//! Port contracts for message persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the message store
//! service.

pub mod repository;

pub use repository::{MessageRepository, MessageRepositoryError, MessageRepositoryResult};

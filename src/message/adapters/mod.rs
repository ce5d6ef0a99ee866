//! Storage adapters implementing the [`MessageRepository`] port.
//!
//! - [`memory::InMemoryMessageRepository`]: thread-safe in-memory storage for
//!   tests and embedding
//! - [`postgres::PostgresMessageRepository`]: `PostgreSQL` persistence using
//!   Diesel
//!
//! [`MessageRepository`]: crate::message::ports::MessageRepository

pub mod memory;
pub mod postgres;

//! In-memory adapter implementations.

mod message;

pub use message::InMemoryMessageRepository;

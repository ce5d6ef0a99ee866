//! Colloquy: persistence and tagging for chat messages.
//!
//! This crate stores messages posted into conversations, supports soft
//! deletion, and lets callers label messages with free-form tags and search
//! for them by any matching tag.
//!
//! # Architecture
//!
//! Colloquy follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`message`]: Message lifecycle, tagging, and tag search

pub mod message;

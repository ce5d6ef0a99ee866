//! `PostgreSQL` adapters for message persistence.

mod config;
mod models;
mod repository;
mod schema;

pub use config::{
    CONNECT_TIMEOUT_ENV, DATABASE_URL_ENV, FALLBACK_DATABASE_URL_ENV, POOL_SIZE_ENV,
    PostgresStoreConfig, StoreConfigError,
};
pub use repository::{MessagePgPool, PostgresMessageRepository};

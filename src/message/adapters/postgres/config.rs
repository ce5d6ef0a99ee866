//! Connection settings for the `PostgreSQL` message store.

use super::MessagePgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::Duration;
use thiserror::Error;

/// Primary environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "COLLOQUY_DATABASE_URL";
/// Fallback environment variable holding the database URL.
pub const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_ENV: &str = "COLLOQUY_DB_POOL_SIZE";
/// Environment variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "COLLOQUY_DB_CONNECT_TIMEOUT_SECS";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum StoreConfigError {
    /// No database URL was configured.
    #[error("missing database URL: set COLLOQUY_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    /// A numeric setting could not be parsed or was out of range.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// The setting name.
        key: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Settings for [`PostgresMessageRepository`](super::PostgresMessageRepository).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresStoreConfig {
    database_url: String,
    max_pool_size: u32,
    connection_timeout: Duration,
}

impl PostgresStoreConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_POOL_SIZE,
            connection_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Sets how long to wait for a pooled connection.
    #[must_use]
    pub const fn with_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }

    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`StoreConfigError::MissingDatabaseUrl`] when no URL is set and
    /// [`StoreConfigError::InvalidValue`] when a numeric setting is invalid.
    pub fn from_env() -> Result<Self, StoreConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`PostgresStoreConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_ENV)
            .or_else(|| lookup(FALLBACK_DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
            .ok_or(StoreConfigError::MissingDatabaseUrl)?;

        let mut config = Self::new(database_url);
        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            config.max_pool_size = parse_setting(POOL_SIZE_ENV, &raw)?;
        }
        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            config.connection_timeout =
                Duration::from_secs(parse_setting(CONNECT_TIMEOUT_ENV, &raw)?);
        }
        Ok(config)
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_pool_size(&self) -> u32 {
        self.max_pool_size
    }

    /// Returns the connection timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Builds the connection pool, establishing the initial connections.
    ///
    /// # Errors
    ///
    /// Returns [`StoreConfigError::Pool`] when the database cannot be reached
    /// within the connection timeout.
    pub fn build_pool(&self) -> Result<MessagePgPool, StoreConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_pool_size)
            .connection_timeout(self.connection_timeout)
            .build(manager)?;
        Ok(pool)
    }
}

fn parse_setting<T>(key: &'static str, raw: &str) -> Result<T, StoreConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let invalid = || StoreConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
    };
    let value = raw.trim().parse::<T>().map_err(|_| invalid())?;
    if value <= T::default() {
        return Err(invalid());
    }
    Ok(value)
}

//! Store configuration resolved from the environment.
//!
//! ## Environment Variables
//! - `BUJO_DATABASE_URL` - `PostgreSQL` connection URL (required for a ready
//!   session)
//! - `BUJO_POOL_SIZE` - Maximum pooled connections (default: 4)
//! - `BUJO_NOTICE_TTL_SECS` - Lifetime of failure notices (default: 5)

use crate::journal::{
    adapters::postgres::{JournalPgPool, PostgresJournalRepository},
    services::{JournalService, JournalSession},
};
use chrono::TimeDelta;
use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "BUJO_DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_ENV: &str = "BUJO_POOL_SIZE";
/// Environment variable holding the notice lifetime in seconds.
pub const NOTICE_TTL_ENV: &str = "BUJO_NOTICE_TTL_SECS";

const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_NOTICE_TTL_SECS: u32 = 5;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors detected while configuring the journal store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No database URL was provided.
    #[error("BUJO_DATABASE_URL is not set")]
    MissingDatabaseUrl,

    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Offending variable.
        key: &'static str,
        /// Rejected raw value.
        value: String,
    },

    /// The connection pool could not be built.
    #[error("could not connect to the journal store: {0}")]
    Pool(String),
}

/// Resolved journal store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    database_url: Option<String>,
    pool_size: u32,
    notice_ttl: TimeDelta,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            notice_ttl: TimeDelta::seconds(i64::from(DEFAULT_NOTICE_TTL_SECS)),
        }
    }
}

impl JournalConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] when a numeric variable
    /// does not parse. A missing database URL is not an error here; it is
    /// reported by [`JournalConfig::connect`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] when a numeric variable
    /// does not parse or is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_ENV)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        let pool_size = parse_positive(POOL_SIZE_ENV, lookup(POOL_SIZE_ENV), DEFAULT_POOL_SIZE)?;
        let ttl_secs = parse_positive(
            NOTICE_TTL_ENV,
            lookup(NOTICE_TTL_ENV),
            DEFAULT_NOTICE_TTL_SECS,
        )?;

        Ok(Self {
            database_url,
            pool_size,
            notice_ttl: TimeDelta::seconds(i64::from(ttl_secs)),
        })
    }

    /// Sets the database URL.
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Returns the database URL, if configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns how long failure notices stay visible.
    #[must_use]
    pub const fn notice_ttl(&self) -> TimeDelta {
        self.notice_ttl
    }

    /// Builds a `PostgreSQL` repository from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingDatabaseUrl`] when no URL is set
    /// or [`ConfigurationError::Pool`] when the pool cannot connect.
    pub fn connect(&self) -> Result<PostgresJournalRepository, ConfigurationError> {
        let url = self
            .database_url()
            .ok_or(ConfigurationError::MissingDatabaseUrl)?;
        let pool: JournalPgPool = JournalPgPool::builder()
            .max_size(self.pool_size)
            .connection_timeout(CONNECT_TIMEOUT)
            .build(ConnectionManager::<PgConnection>::new(url))
            .map_err(|err| ConfigurationError::Pool(err.to_string()))?;
        info!(pool_size = self.pool_size, "connected to journal store");
        Ok(PostgresJournalRepository::new(pool))
    }
}

/// Opens a session against the configured `PostgreSQL` store, or a degraded
/// session when the store cannot be configured.
#[must_use]
pub fn open_session<C>(
    config: &JournalConfig,
    clock: Arc<C>,
) -> JournalSession<PostgresJournalRepository, C>
where
    C: Clock + Send + Sync,
{
    match config.connect() {
        Ok(repository) => JournalSession::new(
            JournalService::new(Arc::new(repository), clock),
            config.notice_ttl(),
        ),
        Err(reason) => JournalSession::unconfigured(reason, clock, config.notice_ttl()),
    }
}

fn parse_positive(
    key: &'static str,
    raw: Option<String>,
    default: u32,
) -> Result<u32, ConfigurationError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigurationError::InvalidValue { key, value }),
    }
}

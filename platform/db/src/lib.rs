//! Database primitives: connection settings, pool construction and the
//! employee storage accessor.

pub mod employees;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use thiserror::Error;
use tracing::info;

/// Shared connection pool handle.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL missing")]
    MissingUrl,
    #[error("invalid {key}: {value:?}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("failed to connect to database")]
    Connect(#[source] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Connection settings resolved from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    url: String,
    max_connections: Option<u32>,
    connect_timeout: Option<Duration>,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
            connect_timeout: None,
        }
    }

    /// Resolve settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DbResult<Self> {
        let url = lookup("DATABASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(DbError::MissingUrl)?;
        let max_connections = parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS")?;
        let connect_timeout = parse_positive(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS")?
            .map(|secs| Duration::from_secs(u64::from(secs)));
        Ok(Self {
            url,
            max_connections,
            connect_timeout,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.url
    }

    pub fn max_connections(&self) -> Option<u32> {
        self.max_connections
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        options.sqlx_logging(false);
        if let Some(max) = self.max_connections {
            options.max_connections(max);
        }
        if let Some(timeout) = self.connect_timeout {
            options.connect_timeout(timeout);
        }
        options
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> DbResult<Option<u32>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(DbError::InvalidSetting { key, value: raw }),
    }
}

/// Open the shared pool.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let pool = Database::connect(settings.connect_options())
        .await
        .map_err(DbError::Connect)?;
    info!(backend = ?pool.get_database_backend(), "database pool ready");
    Ok(pool)
}

/// Round-trip a trivial query; used by the health endpoint.
pub async fn ping<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "SELECT 1"))
        .await
        .map(|_| ())
}

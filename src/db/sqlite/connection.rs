//! SQLite connection pool and migration management.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::debug;

use super::expense::SqliteExpenseRepository;
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// Holds a connection pool. Each repository call checks a connection out of
/// the pool and returns it when the call finishes, so no request keeps a
/// connection beyond its own unit of work.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Connect using a `sqlite://` URL, creating the file if needed.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DbError::Connection {
                message: format!("Invalid database URL '{}': {}", url, e),
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(url, "Connected to SQLite");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Pinned to a single connection that never expires; every new
    /// connection to `:memory:` would be a different, empty database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            DbError::Connection {
                message: e.to_string(),
            }
        })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Direct pool access for tests and ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Expenses<'a> = SqliteExpenseRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("data/sql/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        Ok(())
    }

    fn expenses(&self) -> Self::Expenses<'_> {
        SqliteExpenseRepository { pool: &self.pool }
    }
}

//! Store handle and connection management

use crate::schema::SCHEMA;
use crate::{DbError, DbResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// In-memory database URL, mainly for tests
pub const MEMORY_URL: &str = "sqlite::memory:";

/// Snapshot store wrapping a single-connection SQLite pool.
///
/// The pool never holds more than one connection, so every write goes
/// through the same handle and snapshot ids grow in commit order.
#[derive(Clone)]
pub struct SnapshotStore {
    pool: SqlitePool,
}

impl SnapshotStore {
    /// Open a store from a connection string (`sqlite://weather_app.db`, `sqlite::memory:`)
    pub async fn new(database_url: &str) -> DbResult<Self> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        Self::with_options(opts).await
    }

    /// Open (or create) a database file
    pub async fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Self::with_options(StoreBuilder::new(path.as_ref()).build()).await
    }

    /// Fresh private in-memory database
    pub async fn in_memory() -> DbResult<Self> {
        Self::new(MEMORY_URL).await
    }

    /// Open a store with custom options and make sure the schema exists
    pub async fn with_options(opts: SqliteConnectOptions) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            // An in-memory database lives only as long as its connection
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Get reference to underlying pool for direct queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn init_schema(&self) -> DbResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Schema ready ({} statements)", SCHEMA.len());
        Ok(())
    }

    /// Test the database connection
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the connection pool gracefully
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Build SQLite connection options for a database file
pub struct StoreBuilder {
    path: PathBuf,
    busy_timeout: Duration,
    create_if_missing: bool,
}

impl StoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_secs(5),
            create_if_missing: true,
        }
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn build(self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
            .busy_timeout(self.busy_timeout)
            .foreign_keys(true)
    }

    /// Validate and open
    pub async fn open(self) -> DbResult<SnapshotStore> {
        if self.path.as_os_str().is_empty() {
            return Err(DbError::ConfigError("database path is empty".to_string()));
        }
        SnapshotStore::with_options(self.build()).await
    }
}

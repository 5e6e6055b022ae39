use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use crate::error::StoreResult;

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling support. The schema to apply is
/// supplied by the app module (`social` or `catalog`) that opens the
/// database.
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool.
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path_str = path.as_ref().to_string_lossy();
        let in_memory = path_str.trim().eq_ignore_ascii_case(MEMORY_DB_PATH);

        let manager = if in_memory {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path.as_ref())
        };
        // Foreign-key enforcement is off by default in SQLite and is
        // per-connection state; cascades and FK errors depend on it.
        let manager =
            manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

        // A :memory: manager opens a distinct database per connection; cap
        // the pool at one so every checkout sees the same database.
        let builder = if in_memory {
            Pool::builder().max_size(1)
        } else {
            Pool::builder()
        };
        let pool = builder.build(manager)?;
        Ok(Self { pool })
    }

    /// Create an in-memory database pool (useful for testing).
    pub fn in_memory() -> StoreResult<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Apply a schema batch. Statements use IF NOT EXISTS, so this is safe
    /// to run on an already-initialized database.
    pub fn initialize(&self, schema: &str) -> StoreResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(schema)?;
        tracing::info!("database schema initialized");
        Ok(())
    }

    /// Load a seed-data batch.
    pub fn seed(&self, seed: &str) -> StoreResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(seed)?;
        tracing::info!("seed data loaded");
        Ok(())
    }

    /// Get a connection from the pool.
    pub fn connection(&self) -> StoreResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_keys_are_enforced_on_every_connection() {
        let db = Database::in_memory().expect("Failed to create database");
        let conn = db.connection().expect("Failed to get connection");
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("Failed to read pragma");
        assert_eq!(enabled, 1);
    }

    #[test]
    fn memory_database_detection_ignores_case_and_whitespace() {
        for path in [":memory:", " :memory: ", ":MEMORY:"] {
            Database::new(path).expect("Failed to create memory database");
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let schema = "CREATE TABLE IF NOT EXISTS t (id INTEGER PRIMARY KEY);";
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize(schema).expect("first initialize");
        db.initialize(schema).expect("second initialize");
    }

    #[test]
    fn file_database_creation() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("tandem_test.db");
        let db = Database::new(&path).expect("Failed to create file database");
        db.initialize("CREATE TABLE IF NOT EXISTS t (id INTEGER PRIMARY KEY);")
            .expect("Failed to initialize file schema");
        assert!(path.exists());
    }
}

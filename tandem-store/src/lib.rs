// Persistence layer for the Tandem demo apps. Each app gets its own SQLite
// database; `social` and `catalog` expose the schema and repositories for
// their respective data models.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod social;

pub use db::{Database, DbConnection, DbPool};
pub use error::{StoreError, StoreResult};

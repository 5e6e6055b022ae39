//! Persistence for the catalog app: users, planets, characters, and
//! per-user favorites. Unlike the social app there are no cascade rules;
//! deletes that would orphan dependents fail with a foreign-key violation.

pub mod repositories;
pub mod schema;

use std::path::Path;

use crate::db::Database;
use crate::error::StoreResult;

/// Open (and initialize) the catalog database at the given path.
pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Database> {
    let db = Database::new(path)?;
    db.initialize(schema::SCHEMA)?;
    Ok(db)
}

/// Open an initialized in-memory catalog database (useful for testing).
pub fn open_in_memory() -> StoreResult<Database> {
    let db = Database::in_memory()?;
    db.initialize(schema::SCHEMA)?;
    Ok(db)
}

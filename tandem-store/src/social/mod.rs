//! Persistence for the social app: users, posts, comments, likes, and
//! follow edges. Deleting a user cascades to everything they own; deleting
//! a post cascades to its comments and likes.

pub mod repositories;
pub mod schema;

use std::path::Path;

use crate::db::Database;
use crate::error::StoreResult;

/// Open (and initialize) the social database at the given path.
pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Database> {
    let db = Database::new(path)?;
    db.initialize(schema::SCHEMA)?;
    Ok(db)
}

/// Open an initialized in-memory social database (useful for testing).
pub fn open_in_memory() -> StoreResult<Database> {
    let db = Database::in_memory()?;
    db.initialize(schema::SCHEMA)?;
    Ok(db)
}

use rusqlite::Row;

use tandem_types::catalog::{Favorite, FavoriteTarget};

use crate::db::DbPool;
use crate::error::StoreResult;

fn row_to_favorite(row: &Row<'_>) -> rusqlite::Result<Favorite> {
    let planet_id: Option<i64> = row.get(2)?;
    let character_id: Option<i64> = row.get(3)?;
    // The CHECK constraint guarantees exactly one side is set.
    let target = match (planet_id, character_id) {
        (Some(id), None) => FavoriteTarget::Planet(id),
        (None, Some(id)) => FavoriteTarget::Character(id),
        _ => {
            return Err(rusqlite::Error::InvalidColumnType(
                2,
                "favorites row with zero or two targets".to_string(),
                rusqlite::types::Type::Null,
            ))
        }
    };
    Ok(Favorite {
        id: row.get(0)?,
        user_id: row.get(1)?,
        target,
    })
}

fn target_columns(target: FavoriteTarget) -> (Option<i64>, Option<i64>) {
    match target {
        FavoriteTarget::Planet(id) => (Some(id), None),
        FavoriteTarget::Character(id) => (None, Some(id)),
    }
}

pub struct FavoriteRepository {
    pool: DbPool,
}

impl FavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a favorite for a user. The target type fixes which foreign-key
    /// column is populated; a nonexistent user or target surfaces as
    /// `StoreError::ForeignKey`.
    pub fn add(&self, user_id: i64, target: FavoriteTarget) -> StoreResult<Favorite> {
        let conn = self.pool.get()?;
        let (planet_id, character_id) = target_columns(target);
        conn.execute(
            "INSERT INTO favorites (user_id, planet_id, character_id) VALUES (?, ?, ?)",
            (user_id, planet_id, character_id),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, user_id, ?target, "added favorite");

        Ok(Favorite {
            id,
            user_id,
            target,
        })
    }

    /// Remove a user's favorite of the given target. Returns the number of
    /// rows removed.
    pub fn remove(&self, user_id: i64, target: FavoriteTarget) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = match target {
            FavoriteTarget::Planet(id) => conn.execute(
                "DELETE FROM favorites WHERE user_id = ? AND planet_id = ?",
                (user_id, id),
            )?,
            FavoriteTarget::Character(id) => conn.execute(
                "DELETE FROM favorites WHERE user_id = ? AND character_id = ?",
                (user_id, id),
            )?,
        };
        Ok(rows)
    }

    /// Get all favorites recorded by a user.
    pub fn favorites_for_user(&self, user_id: i64) -> StoreResult<Vec<Favorite>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, planet_id, character_id FROM favorites
             WHERE user_id = ? ORDER BY id",
        )?;
        let favorites = stmt
            .query_map([user_id], row_to_favorite)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(favorites)
    }

    /// Delete a favorite by its row id.
    pub fn delete(&self, favorite_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM favorites WHERE id = ?", [favorite_id])?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{open_in_memory, schema::SEED_DATA};
    use crate::StoreError;

    fn setup() -> (crate::Database, FavoriteRepository) {
        let db = open_in_memory().expect("Failed to create test database");
        db.seed(SEED_DATA).expect("Failed to seed test data");
        let repo = FavoriteRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn add_and_list_favorites() {
        let (_db, repo) = setup();
        repo.add(2, FavoriteTarget::Character(2)).unwrap();

        let favorites = repo.favorites_for_user(2).unwrap();
        let targets: Vec<_> = favorites.iter().map(|f| f.target).collect();
        assert_eq!(
            targets,
            [FavoriteTarget::Planet(1), FavoriteTarget::Character(2)]
        );
    }

    #[test]
    fn remove_targets_only_the_matching_favorite() {
        let (_db, repo) = setup();

        // User 1 favorites planet 2 and character 4 in the seed data.
        assert_eq!(repo.remove(1, FavoriteTarget::Planet(2)).unwrap(), 1);
        let remaining = repo.favorites_for_user(1).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].target, FavoriteTarget::Character(4));
    }

    #[test]
    fn favorite_by_missing_user_is_a_foreign_key_violation() {
        let (_db, repo) = setup();
        let err = repo.add(999, FavoriteTarget::Planet(1)).unwrap_err();
        assert!(err.is_foreign_key(), "got {err:?}");
    }

    #[test]
    fn favorite_of_missing_target_is_a_foreign_key_violation() {
        let (_db, repo) = setup();
        let err = repo.add(1, FavoriteTarget::Character(999)).unwrap_err();
        assert!(err.is_foreign_key(), "got {err:?}");
    }

    #[test]
    fn schema_rejects_a_row_with_both_targets() {
        let (db, _repo) = setup();
        let conn = db.connection().unwrap();
        let err = conn
            .execute(
                "INSERT INTO favorites (user_id, planet_id, character_id) VALUES (1, 1, 1)",
                [],
            )
            .map_err(StoreError::from)
            .unwrap_err();
        assert!(matches!(err, StoreError::Check(_)), "got {err:?}");
    }

    #[test]
    fn schema_rejects_a_row_with_no_target() {
        let (db, _repo) = setup();
        let conn = db.connection().unwrap();
        let err = conn
            .execute(
                "INSERT INTO favorites (user_id, planet_id, character_id) VALUES (1, NULL, NULL)",
                [],
            )
            .map_err(StoreError::from)
            .unwrap_err();
        assert!(matches!(err, StoreError::Check(_)), "got {err:?}");
    }

    #[test]
    fn delete_by_row_id() {
        let (_db, repo) = setup();
        assert_eq!(repo.delete(3).unwrap(), 1);
        assert!(repo.favorites_for_user(2).unwrap().is_empty());
    }
}

use chrono::Utc;
use rusqlite::Row;

use tandem_types::social::Follow;

use crate::db::{parse_timestamp, DbPool};
use crate::error::StoreResult;

fn row_to_follow(row: &Row<'_>) -> rusqlite::Result<Follow> {
    Ok(Follow {
        id: row.get(0)?,
        follower_id: row.get(1)?,
        followee_id: row.get(2)?,
        created_at: parse_timestamp(3, row.get(3)?)?,
    })
}

pub struct FollowRepository {
    pool: DbPool,
}

impl FollowRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record that `follower_id` follows `followee_id`. Either end missing
    /// surfaces as `StoreError::ForeignKey`. The edge is directed; the pair
    /// is not deduplicated (use `is_following` first where that matters).
    pub fn follow(&self, follower_id: i64, followee_id: i64) -> StoreResult<Follow> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO follows (follower_id, followee_id, created_at) VALUES (?, ?, ?)",
            (follower_id, followee_id, created_at.to_rfc3339()),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(follower_id, followee_id, "recorded follow");

        Ok(Follow {
            id,
            follower_id,
            followee_id,
            created_at,
        })
    }

    /// Remove all edges from `follower_id` to `followee_id`. Returns the
    /// number of rows removed.
    pub fn unfollow(&self, follower_id: i64, followee_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "DELETE FROM follows WHERE follower_id = ? AND followee_id = ?",
            (follower_id, followee_id),
        )?;
        Ok(rows)
    }

    /// Check if user A is following user B
    pub fn is_following(&self, follower_id: i64, followee_id: i64) -> StoreResult<bool> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ? AND followee_id = ?",
            (follower_id, followee_id),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Get the ids of users that follow this user.
    pub fn followers_of(&self, user_id: i64) -> StoreResult<Vec<i64>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT follower_id FROM follows WHERE followee_id = ? ORDER BY created_at DESC",
        )?;
        let followers = stmt
            .query_map([user_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(followers)
    }

    /// Get the ids of users this user is following.
    pub fn following_of(&self, user_id: i64) -> StoreResult<Vec<i64>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT followee_id FROM follows WHERE follower_id = ? ORDER BY created_at DESC",
        )?;
        let following = stmt
            .query_map([user_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(following)
    }

    /// Get follower count
    pub fn follower_count(&self, user_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE followee_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Get following count
    pub fn following_count(&self, user_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// List the raw edges pointing at this user, newest first.
    pub fn edges_to(&self, user_id: i64) -> StoreResult<Vec<Follow>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, follower_id, followee_id, created_at FROM follows
             WHERE followee_id = ? ORDER BY created_at DESC",
        )?;
        let edges = stmt
            .query_map([user_id], row_to_follow)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::{open_in_memory, schema::SEED_DATA};

    fn setup() -> (crate::Database, FollowRepository) {
        let db = open_in_memory().expect("Failed to create test database");
        db.seed(SEED_DATA).expect("Failed to seed test data");
        let repo = FollowRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn follow_and_unfollow_round_trip() {
        let (_db, repo) = setup();

        assert!(!repo.is_following(2, 3).unwrap());
        repo.follow(2, 3).unwrap();
        assert!(repo.is_following(2, 3).unwrap());
        assert_eq!(repo.unfollow(2, 3).unwrap(), 1);
        assert!(!repo.is_following(2, 3).unwrap());
    }

    #[test]
    fn follower_and_followee_ends_are_distinct() {
        let (_db, repo) = setup();

        // Seed graph: 2 -> 1, 3 -> 1, 1 -> 3.
        assert_eq!(repo.followers_of(1).unwrap().len(), 2);
        assert_eq!(repo.following_of(1).unwrap(), [3]);

        // Following is one-way: 3 follows 1, 1 does not follow 2.
        assert!(repo.is_following(3, 1).unwrap());
        assert!(!repo.is_following(1, 2).unwrap());
    }

    #[test]
    fn counts_match_edge_directions() {
        let (_db, repo) = setup();
        assert_eq!(repo.follower_count(1).unwrap(), 2);
        assert_eq!(repo.following_count(1).unwrap(), 1);
        assert_eq!(repo.follower_count(2).unwrap(), 0);
    }

    #[test]
    fn follow_with_missing_followee_is_a_foreign_key_violation() {
        let (_db, repo) = setup();
        let err = repo.follow(1, 999).unwrap_err();
        assert!(err.is_foreign_key(), "got {err:?}");
    }

    #[test]
    fn follow_with_missing_follower_is_a_foreign_key_violation() {
        let (_db, repo) = setup();
        let err = repo.follow(999, 1).unwrap_err();
        assert!(err.is_foreign_key(), "got {err:?}");
    }

    #[test]
    fn edges_to_exposes_full_rows() {
        let (_db, repo) = setup();
        let edges = repo.edges_to(1).unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.followee_id == 1));
    }
}

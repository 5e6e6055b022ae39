use chrono::Utc;
use rusqlite::Row;

use tandem_types::social::Like;

use crate::db::{parse_timestamp, DbPool};
use crate::error::StoreResult;

fn row_to_like(row: &Row<'_>) -> rusqlite::Result<Like> {
    Ok(Like {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        created_at: parse_timestamp(3, row.get(3)?)?,
    })
}

pub struct LikeRepository {
    pool: DbPool,
}

impl LikeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Like a post. One like per (post, user) pair; a second like from the
    /// same user surfaces as `StoreError::Duplicate`, a nonexistent post or
    /// user as `StoreError::ForeignKey`.
    pub fn like(&self, post_id: i64, user_id: i64) -> StoreResult<Like> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO likes (post_id, user_id, created_at) VALUES (?, ?, ?)",
            (post_id, user_id, created_at.to_rfc3339()),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(post_id, user_id, "liked post");

        Ok(Like {
            id,
            post_id,
            user_id,
            created_at,
        })
    }

    /// Remove a user's like from a post. Returns the number of rows removed
    /// (0 if there was no like to remove).
    pub fn unlike(&self, post_id: i64, user_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "DELETE FROM likes WHERE post_id = ? AND user_id = ?",
            (post_id, user_id),
        )?;
        Ok(rows)
    }

    /// Get all likes on a post, oldest first.
    pub fn likes_for_post(&self, post_id: i64) -> StoreResult<Vec<Like>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, post_id, user_id, created_at FROM likes
             WHERE post_id = ? ORDER BY created_at ASC",
        )?;
        let likes = stmt
            .query_map([post_id], row_to_like)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(likes)
    }

    /// Get like count for a post
    pub fn like_count(&self, post_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE post_id = ?",
            [post_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Check whether a user has liked a post
    pub fn has_liked(&self, post_id: i64, user_id: i64) -> StoreResult<bool> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE post_id = ? AND user_id = ?",
            (post_id, user_id),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

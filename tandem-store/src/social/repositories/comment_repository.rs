use chrono::Utc;
use rusqlite::{OptionalExtension, Row};

use tandem_types::social::{Comment, NewComment};

use crate::db::{parse_timestamp, DbPool};
use crate::error::StoreResult;

const COMMENT_COLUMNS: &str = "id, post_id, user_id, body, created_at";

fn row_to_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        body: row.get(3)?,
        created_at: parse_timestamp(4, row.get(4)?)?,
    })
}

pub struct CommentRepository {
    pool: DbPool,
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new comment. A nonexistent post or author surfaces as
    /// `StoreError::ForeignKey`.
    pub fn create(&self, new_comment: &NewComment) -> StoreResult<Comment> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO comments (post_id, user_id, body, created_at) VALUES (?, ?, ?, ?)",
            (
                new_comment.post_id,
                new_comment.user_id,
                &new_comment.body,
                created_at.to_rfc3339(),
            ),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, post_id = new_comment.post_id, "created comment");

        Ok(Comment {
            id,
            post_id: new_comment.post_id,
            user_id: new_comment.user_id,
            body: new_comment.body.clone(),
            created_at,
        })
    }

    /// Get comment by ID
    pub fn get_by_id(&self, comment_id: i64) -> StoreResult<Option<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
        ))?;
        let comment = stmt.query_row([comment_id], row_to_comment).optional()?;
        Ok(comment)
    }

    /// Get all comments on a post, oldest first.
    pub fn comments_for_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ? ORDER BY created_at ASC"
        ))?;
        let comments = stmt
            .query_map([post_id], row_to_comment)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    /// Get all comments written by a user, newest first.
    pub fn comments_by_user(&self, user_id: i64) -> StoreResult<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE user_id = ? ORDER BY created_at DESC"
        ))?;
        let comments = stmt
            .query_map([user_id], row_to_comment)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    /// Delete a comment.
    pub fn delete(&self, comment_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM comments WHERE id = ?", [comment_id])?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::{open_in_memory, schema::SEED_DATA};

    fn setup() -> (crate::Database, CommentRepository) {
        let db = open_in_memory().expect("Failed to create test database");
        db.seed(SEED_DATA).expect("Failed to seed test data");
        let repo = CommentRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn create_and_fetch_comment() {
        let (_db, repo) = setup();
        let created = repo
            .create(&NewComment {
                post_id: 3,
                user_id: 3,
                body: "Agreed".to_string(),
            })
            .unwrap();

        let fetched = repo.get_by_id(created.id).unwrap().expect("comment exists");
        assert_eq!(fetched.post_id, 3);
        assert_eq!(fetched.body, "Agreed");
    }

    #[test]
    fn comment_on_missing_post_is_a_foreign_key_violation() {
        let (_db, repo) = setup();
        let err = repo
            .create(&NewComment {
                post_id: 999,
                user_id: 1,
                body: "into the void".to_string(),
            })
            .unwrap_err();
        assert!(err.is_foreign_key(), "got {err:?}");
    }

    #[test]
    fn comment_by_missing_user_is_a_foreign_key_violation() {
        let (_db, repo) = setup();
        let err = repo
            .create(&NewComment {
                post_id: 1,
                user_id: 999,
                body: "ghost comment".to_string(),
            })
            .unwrap_err();
        assert!(err.is_foreign_key(), "got {err:?}");
    }

    #[test]
    fn comments_for_post_come_back_oldest_first() {
        let (_db, repo) = setup();
        let comments = repo.comments_for_post(1).unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments[0].created_at <= comments[1].created_at);
        assert_eq!(comments[0].body, "Great light!");
    }

    #[test]
    fn comments_by_user_filters_on_author() {
        let (_db, repo) = setup();
        let comments = repo.comments_by_user(1).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, 4);
    }

    #[test]
    fn delete_removes_only_the_target_comment() {
        let (_db, repo) = setup();
        assert_eq!(repo.delete(1).unwrap(), 1);
        assert!(repo.get_by_id(1).unwrap().is_none());
        assert!(repo.get_by_id(2).unwrap().is_some());
    }
}

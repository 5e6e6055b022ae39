use chrono::Utc;
use rusqlite::{OptionalExtension, Row};

use tandem_types::social::{NewPost, Post};

use crate::db::{parse_timestamp, DbPool};
use crate::error::StoreResult;

const POST_COLUMNS: &str = "id, user_id, image_url, caption, created_at";

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        image_url: row.get(2)?,
        caption: row.get(3)?,
        created_at: parse_timestamp(4, row.get(4)?)?,
    })
}

pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post. A nonexistent author surfaces as
    /// `StoreError::ForeignKey`.
    pub fn create(&self, new_post: &NewPost) -> StoreResult<Post> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO posts (user_id, image_url, caption, created_at) VALUES (?, ?, ?, ?)",
            (
                new_post.user_id,
                &new_post.image_url,
                &new_post.caption,
                created_at.to_rfc3339(),
            ),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, user_id = new_post.user_id, "created post");

        Ok(Post {
            id,
            user_id: new_post.user_id,
            image_url: new_post.image_url.clone(),
            caption: new_post.caption.clone(),
            created_at,
        })
    }

    /// Get post by ID
    pub fn get_by_id(&self, post_id: i64) -> StoreResult<Option<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))?;
        let post = stmt.query_row([post_id], row_to_post).optional()?;
        Ok(post)
    }

    /// Get the most recent posts, newest first.
    pub fn list_recent(&self, limit: i64) -> StoreResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT ?"
        ))?;
        let posts = stmt
            .query_map([limit], row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    /// Get posts by a specific user, newest first.
    pub fn posts_by_user(&self, user_id: i64) -> StoreResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = ? ORDER BY created_at DESC"
        ))?;
        let posts = stmt
            .query_map([user_id], row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    /// Delete a post. Its comments and likes go with it.
    pub fn delete(&self, post_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM posts WHERE id = ?", [post_id])?;
        tracing::debug!(post_id, rows, "deleted post");
        Ok(rows)
    }
}

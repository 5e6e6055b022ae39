use chrono::Utc;
use rusqlite::{OptionalExtension, Row};

use tandem_types::social::{NewUser, ProfileUpdate, User};

use crate::db::{parse_timestamp, DbPool};
use crate::error::StoreResult;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, display_name, bio, avatar_url, created_at";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        display_name: row.get(4)?,
        bio: row.get(5)?,
        avatar_url: row.get(6)?,
        created_at: parse_timestamp(7, row.get(7)?)?,
    })
}

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user. Duplicate usernames or emails surface as
    /// `StoreError::Duplicate`.
    pub fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO users (username, email, password_hash, display_name, bio, avatar_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                &new_user.username,
                &new_user.email,
                &new_user.password_hash,
                &new_user.display_name,
                &new_user.bio,
                &new_user.avatar_url,
                created_at.to_rfc3339(),
            ),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, username = %new_user.username, "created user");

        Ok(User {
            id,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            display_name: new_user.display_name.clone(),
            bio: new_user.bio.clone(),
            avatar_url: new_user.avatar_url.clone(),
            created_at,
        })
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: i64) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))?;
        let user = stmt.query_row([user_id], row_to_user).optional()?;
        Ok(user)
    }

    /// Get user by username
    pub fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))?;
        let user = stmt.query_row([username], row_to_user).optional()?;
        Ok(user)
    }

    /// Get user by email
    pub fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))?;
        let user = stmt.query_row([email], row_to_user).optional()?;
        Ok(user)
    }

    /// Get all users
    pub fn list_all(&self) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username"
        ))?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Replace the user's profile fields (display name, bio, avatar URL).
    /// Returns the number of rows updated (0 if the user does not exist).
    pub fn update_profile(&self, user_id: i64, update: &ProfileUpdate) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE users SET display_name = ?, bio = ?, avatar_url = ? WHERE id = ?",
            (
                &update.display_name,
                &update.bio,
                &update.avatar_url,
                user_id,
            ),
        )?;
        Ok(rows)
    }

    /// Delete a user. Their posts, comments, likes, and follow edges on both
    /// ends go with them.
    pub fn delete(&self, user_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM users WHERE id = ?", [user_id])?;
        tracing::debug!(user_id, rows, "deleted user");
        Ok(rows)
    }
}

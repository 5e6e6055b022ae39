use rusqlite::{OptionalExtension, Row};

use tandem_types::catalog::{NewUser, User};

use crate::db::DbPool;
use crate::error::StoreResult;

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        nickname: row.get(3)?,
    })
}

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user. A duplicate email surfaces as
    /// `StoreError::Duplicate`.
    pub fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO users (email, password, nickname) VALUES (?, ?, ?)",
            (&new_user.email, &new_user.password, &new_user.nickname),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, nickname = %new_user.nickname, "created catalog user");

        Ok(User {
            id,
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            nickname: new_user.nickname.clone(),
        })
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: i64) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, email, password, nickname FROM users WHERE id = ?")?;
        let user = stmt.query_row([user_id], row_to_user).optional()?;
        Ok(user)
    }

    /// Get user by email
    pub fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, email, password, nickname FROM users WHERE email = ?")?;
        let user = stmt.query_row([email], row_to_user).optional()?;
        Ok(user)
    }

    /// Get all users
    pub fn list_all(&self) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, email, password, nickname FROM users ORDER BY nickname")?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Delete a user. There is no cascade: a user who still has favorites
    /// surfaces as `StoreError::ForeignKey`.
    pub fn delete(&self, user_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM users WHERE id = ?", [user_id])?;
        Ok(rows)
    }
}

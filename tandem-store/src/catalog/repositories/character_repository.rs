use rusqlite::{OptionalExtension, Row};

use tandem_types::catalog::{Character, NewCharacter};

use crate::db::DbPool;
use crate::error::StoreResult;

fn row_to_character(row: &Row<'_>) -> rusqlite::Result<Character> {
    Ok(Character {
        id: row.get(0)?,
        planet_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
    })
}

pub struct CharacterRepository {
    pool: DbPool,
}

impl CharacterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new character. A nonexistent home planet surfaces as
    /// `StoreError::ForeignKey`.
    pub fn create(&self, new_character: &NewCharacter) -> StoreResult<Character> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO characters (planet_id, name, description) VALUES (?, ?, ?)",
            (
                new_character.planet_id,
                &new_character.name,
                &new_character.description,
            ),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %new_character.name, "created character");

        Ok(Character {
            id,
            planet_id: new_character.planet_id,
            name: new_character.name.clone(),
            description: new_character.description.clone(),
        })
    }

    pub fn get_by_id(&self, character_id: i64) -> StoreResult<Option<Character>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, planet_id, name, description FROM characters WHERE id = ?",
        )?;
        let character = stmt.query_row([character_id], row_to_character).optional()?;
        Ok(character)
    }

    /// Get all characters whose home is the given planet.
    pub fn characters_on_planet(&self, planet_id: i64) -> StoreResult<Vec<Character>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, planet_id, name, description FROM characters
             WHERE planet_id = ? ORDER BY name",
        )?;
        let characters = stmt
            .query_map([planet_id], row_to_character)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(characters)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Character>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, planet_id, name, description FROM characters ORDER BY name",
        )?;
        let characters = stmt
            .query_map([], row_to_character)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(characters)
    }

    /// Delete a character. No cascade: a character someone still favorites
    /// surfaces as `StoreError::ForeignKey`.
    pub fn delete(&self, character_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM characters WHERE id = ?", [character_id])?;
        Ok(rows)
    }
}

use rusqlite::{OptionalExtension, Row};

use tandem_types::catalog::{NewPlanet, Planet};

use crate::db::DbPool;
use crate::error::StoreResult;

fn row_to_planet(row: &Row<'_>) -> rusqlite::Result<Planet> {
    Ok(Planet {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        rotation_period: row.get(3)?,
    })
}

pub struct PlanetRepository {
    pool: DbPool,
}

impl PlanetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, new_planet: &NewPlanet) -> StoreResult<Planet> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO planets (name, description, rotation_period) VALUES (?, ?, ?)",
            (
                &new_planet.name,
                &new_planet.description,
                new_planet.rotation_period,
            ),
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %new_planet.name, "created planet");

        Ok(Planet {
            id,
            name: new_planet.name.clone(),
            description: new_planet.description.clone(),
            rotation_period: new_planet.rotation_period,
        })
    }

    pub fn get_by_id(&self, planet_id: i64) -> StoreResult<Option<Planet>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, rotation_period FROM planets WHERE id = ?",
        )?;
        let planet = stmt.query_row([planet_id], row_to_planet).optional()?;
        Ok(planet)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Planet>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, rotation_period FROM planets ORDER BY name",
        )?;
        let planets = stmt
            .query_map([], row_to_planet)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(planets)
    }

    /// Delete a planet. There is no cascade: a planet that still has
    /// characters or favorites surfaces as `StoreError::ForeignKey`.
    pub fn delete(&self, planet_id: i64) -> StoreResult<usize> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM planets WHERE id = ?", [planet_id])?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{open_in_memory, schema::SEED_DATA};

    fn setup() -> (crate::Database, PlanetRepository) {
        let db = open_in_memory().expect("Failed to create test database");
        db.seed(SEED_DATA).expect("Failed to seed test data");
        let repo = PlanetRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn create_and_fetch_planet() {
        let (_db, repo) = setup();
        let created = repo
            .create(&NewPlanet {
                name: "Hoth".to_string(),
                description: Some("Ice world".to_string()),
                rotation_period: Some(23.0),
            })
            .unwrap();

        let fetched = repo.get_by_id(created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Hoth");
        assert_eq!(fetched.rotation_period, Some(23.0));
    }

    #[test]
    fn list_all_is_ordered_by_name() {
        let (_db, repo) = setup();
        let names: Vec<_> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Alderaan", "Dagobah", "Tatooine"]);
    }

    #[test]
    fn deleting_a_planet_with_characters_is_a_foreign_key_violation() {
        let (_db, repo) = setup();
        let err = repo.delete(1).unwrap_err();
        assert!(err.is_foreign_key(), "got {err:?}");
    }
}

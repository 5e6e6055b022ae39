/// SQL schema for the catalog app database.
/// No cascade rules here: rows with dependents must be removed bottom-up.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    email TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    nickname TEXT NOT NULL
);

-- Planets table
CREATE TABLE IF NOT EXISTS planets (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    rotation_period REAL
);

-- Characters table
CREATE TABLE IF NOT EXISTS characters (
    id INTEGER PRIMARY KEY,
    planet_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    FOREIGN KEY (planet_id) REFERENCES planets(id)
);

CREATE INDEX IF NOT EXISTS idx_characters_planet_id ON characters(planet_id);

-- Favorites table. Exactly one of planet_id / character_id is set.
CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    planet_id INTEGER,
    character_id INTEGER,
    CHECK ((planet_id IS NULL) <> (character_id IS NULL)),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (planet_id) REFERENCES planets(id),
    FOREIGN KEY (character_id) REFERENCES characters(id)
);

CREATE INDEX IF NOT EXISTS idx_favorites_user_id ON favorites(user_id);
"#;

/// Seed data for development and testing.
pub const SEED_DATA: &str = r#"
INSERT OR IGNORE INTO users (id, email, password, nickname) VALUES
    (1, 'luke@example.com', 'plainpw1', 'luke'),
    (2, 'leia@example.com', 'plainpw2', 'leia');

INSERT OR IGNORE INTO planets (id, name, description, rotation_period) VALUES
    (1, 'Tatooine', 'Desert world with twin suns', 23.0),
    (2, 'Alderaan', 'Peaceful, mountainous', 24.0),
    (3, 'Dagobah', NULL, 23.4);

INSERT OR IGNORE INTO characters (id, planet_id, name, description) VALUES
    (1, 1, 'Luke Skywalker', 'Moisture-farm kid'),
    (2, 2, 'Leia Organa', NULL),
    (3, 1, 'Owen Lars', 'Moisture farmer'),
    (4, 3, 'Yoda', 'Swamp hermit');

INSERT OR IGNORE INTO favorites (id, user_id, planet_id, character_id) VALUES
    (1, 1, 2, NULL),
    (2, 1, NULL, 4),
    (3, 2, 1, NULL);
"#;

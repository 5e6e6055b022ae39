//! Model types for the catalog app: users, planets, characters, favorites.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Stored as given by the absent app layer. Never serialized.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Rotation period in hours.
    pub rotation_period: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub planet_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// What a favorite points at. Exactly one target per favorite; the schema
/// enforces the same with a CHECK over the two foreign-key columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target_id", rename_all = "snake_case")]
pub enum FavoriteTarget {
    Planet(i64),
    Character(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub target: FavoriteTarget,
}

// Insert payloads. Row ids are assigned by the store.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rotation_period: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCharacter {
    pub planet_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serialization_excludes_password() {
        let user = User {
            id: 3,
            email: "leia@example.com".to_string(),
            password: "hunter2".to_string(),
            nickname: "leia".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(value["email"], "leia@example.com");
        assert_eq!(value["nickname"], "leia");
        assert!(!obj.contains_key("password"));
    }

    #[test]
    fn character_serializes_its_own_fields() {
        let character = Character {
            id: 9,
            planet_id: 2,
            name: "Luke".to_string(),
            description: None,
        };
        let value = serde_json::to_value(&character).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(value["name"], "Luke");
        assert_eq!(value["planet_id"], 2);
        assert!(!obj.contains_key("email"));
        assert!(!obj.contains_key("nickname"));
    }

    #[test]
    fn favorite_serializes_tagged_target() {
        let favorite = Favorite {
            id: 1,
            user_id: 3,
            target: FavoriteTarget::Planet(2),
        };
        let value = serde_json::to_value(&favorite).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["user_id"], 3);
        assert_eq!(value["kind"], "planet");
        assert_eq!(value["target_id"], 2);
        assert!(value.as_object().unwrap().keys().all(|k| {
            matches!(k.as_str(), "id" | "user_id" | "kind" | "target_id")
        }));
    }
}

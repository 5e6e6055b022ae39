use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

/// Per-app database locations. Each app owns a separate database file.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub social: DatabaseSettings,
    pub catalog: DatabaseSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // 1. Try to load from settings.toml (optional)
        let config_file_name = "settings.toml";

        // Check in current directory
        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        // Check in tandem-store directory (for development)
        let dev_path = PathBuf::from("tandem-store").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        builder = builder
            .set_default("social.path", "social.db")?
            .set_default("catalog.path", "catalog.db")?;

        // 2. Override with environment variables (highest priority)
        if let Ok(path) = std::env::var("SOCIAL_DATABASE_PATH") {
            builder = builder.set_override("social.path", path)?;
        }
        if let Ok(path) = std::env::var("CATALOG_DATABASE_PATH") {
            builder = builder.set_override("catalog.path", path)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}

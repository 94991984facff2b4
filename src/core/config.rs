//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Database file used when nothing else is configured
const DEFAULT_DB_FILE: &str = "inventory.db";

/// Partsbin configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file used when --db is not given
    pub database: Option<PathBuf>,

    /// Default output format (table, json, csv, id)
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/pbin/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(db) = std::env::var("PBIN_DB") {
            config.database = Some(PathBuf::from(db));
        }
        if let Ok(format) = std::env::var("PBIN_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "pbin")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Resolved database path
    pub fn database(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_defaults_to_local_file() {
        let config = Config::default();
        assert_eq!(config.database(), PathBuf::from("inventory.db"));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut config = Config {
            database: Some(PathBuf::from("a.db")),
            default_format: None,
        };
        config.merge(Config {
            database: Some(PathBuf::from("b.db")),
            default_format: Some("json".to_string()),
        });
        assert_eq!(config.database(), PathBuf::from("b.db"));
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }
}

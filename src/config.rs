//! Trainer configuration
//!
//! Read from `<config dir>/leitner/config.toml`. The only setting is the
//! database location, which can also come from `LEITNER_DB`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the database path
pub const DB_ENV_VAR: &str = "LEITNER_DB";

const APP_DIR: &str = "leitner";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "flashcard.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// SQLite database holding the cards
    pub database_path: PathBuf,
}

impl Config {
    /// Default data directory (e.g., ~/.local/share/leitner)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or(ConfigError::DataDirNotFound)
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            database_path: Self::default_data_dir()?.join(DB_FILE),
        })
    }

    /// Parse a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Self::with_defaults();
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence, lowest first: defaults, config file, `LEITNER_DB`,
    /// then an explicit database path (the `--db` flag).
    pub fn resolve(db_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match Self::default_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::with_defaults()?,
        };
        config.apply_overrides(std::env::var_os(DB_ENV_VAR).map(PathBuf::from), db_override);
        Ok(config)
    }

    fn apply_overrides(&mut self, env_db: Option<PathBuf>, db_override: Option<PathBuf>) {
        if let Some(path) = db_override.or(env_db) {
            self.database_path = path;
        }
    }
}

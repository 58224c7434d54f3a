pub mod config;
pub mod flashcards;

pub use config::{Config, ConfigError};

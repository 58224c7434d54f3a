use std::path::PathBuf;

use anyhow::{Context, Result};

use leitner_lib::flashcards::{
    validate_text, BoxCounts, CardStore, CardUpdate, Flashcard, SqliteCardStore,
};
use leitner_lib::Config;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub store: SqliteCardStore,
}

impl App {
    /// Resolve the configuration and open the card database
    pub fn new(db_override: Option<PathBuf>) -> Result<Self> {
        let config = Config::resolve(db_override).context("Failed to load configuration")?;
        Self::open(config)
    }

    /// Open the card database named by an already resolved configuration
    pub fn open(config: Config) -> Result<Self> {
        let store = SqliteCardStore::open(&config.database_path).with_context(|| {
            format!("Failed to open database {}", config.database_path.display())
        })?;

        Ok(Self { config, store })
    }

    /// Validate and store a new card
    pub fn add_card(&mut self, question: &str, answer: &str) -> Result<Flashcard> {
        let question = validate_text("question", question)?;
        let answer = validate_text("answer", answer)?;

        let id = self
            .store
            .create(&question, &answer)
            .context("Failed to create flashcard")?;
        self.get_card(id)
    }

    pub fn get_card(&self, id: i64) -> Result<Flashcard> {
        self.store
            .get(id)
            .with_context(|| format!("Failed to get flashcard {}", id))
    }

    /// Validate and apply new text for a card
    pub fn edit_card(
        &mut self,
        id: i64,
        question: Option<&str>,
        answer: Option<&str>,
    ) -> Result<Flashcard> {
        let update = CardUpdate {
            question: question.map(|q| validate_text("question", q)).transpose()?,
            answer: answer.map(|a| validate_text("answer", a)).transpose()?,
        };

        self.store
            .update_fields(id, &update)
            .with_context(|| format!("Failed to update flashcard {}", id))?;
        self.get_card(id)
    }

    pub fn delete_card(&mut self, id: i64) -> Result<()> {
        self.store
            .delete(id)
            .with_context(|| format!("Failed to delete flashcard {}", id))
    }

    pub fn reset_boxes(&mut self) -> Result<usize> {
        self.store.reset_all().context("Failed to reset boxes")
    }

    pub fn box_counts(&self) -> Result<BoxCounts> {
        self.store.box_counts().context("Failed to count flashcards")
    }

    /// List cards, optionally only those in one box
    pub fn list_cards(&self, box_number: Option<u8>) -> Result<Vec<Flashcard>> {
        let cards = match box_number {
            Some(b) => self.store.get_by_box(b),
            None => self.store.list_all(),
        };
        cards.context("Failed to list flashcards")
    }
}

//! Storage operations for flashcards
//!
//! Cards are kept in a single SQLite table:
//! ```text
//! flashcards(id INTEGER PRIMARY KEY, question TEXT, answer TEXT, box_number INTEGER DEFAULT 1)
//! ```

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use super::models::{BoxCounts, CardUpdate, Flashcard, FIRST_BOX};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Card not found: {0}")]
    NotFound(i64),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent collection of flashcards, the single source of truth for
/// card state.
///
/// Expected failures (missing card, backend error) come back as `Err`;
/// nothing here panics. Callers decide whether a failure matters.
pub trait CardStore {
    /// Insert a new card in the first box and return its id
    fn create(&mut self, question: &str, answer: &str) -> Result<i64>;

    fn get(&self, id: i64) -> Result<Flashcard>;

    /// Snapshot of the cards currently in `box_number`, in insertion order.
    ///
    /// The returned list is fully materialized, so later writes do not
    /// change what the caller iterates over.
    fn get_by_box(&self, box_number: u8) -> Result<Vec<Flashcard>>;

    /// Replace the question and/or answer. Never creates a card.
    fn update_fields(&mut self, id: i64, update: &CardUpdate) -> Result<()>;

    /// Set the box to an absolute value. The value is not range checked.
    fn set_box(&mut self, id: i64, box_number: u8) -> Result<()>;

    fn delete(&mut self, id: i64) -> Result<()>;

    /// Put every card, graduated ones included, back into the first box.
    /// Returns the number of cards touched.
    fn reset_all(&mut self) -> Result<usize>;

    /// Total number of stored cards, graduated ones included
    fn count(&self) -> Result<usize>;

    fn box_counts(&self) -> Result<BoxCounts>;

    /// Number of cards a practice pass can still present
    fn active_count(&self) -> Result<usize> {
        Ok(self.box_counts()?.active())
    }

    /// Every card, in insertion order
    fn list_all(&self) -> Result<Vec<Flashcard>>;
}

/// SQLite-backed card store
pub struct SqliteCardStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteCardStore {
    /// Open (or create) the database at the given path
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;
        Self::init(&conn)?;
        log::debug!("Opened flashcard database at {:?}", db_path);

        Ok(Self {
            conn,
            db_path: Some(db_path),
        })
    }

    /// Open a throwaway database that lives only as long as the store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self { conn, db_path: None })
    }

    fn init(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS flashcards (
                id INTEGER PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                box_number INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX IF NOT EXISTS idx_flashcards_box ON flashcards(box_number);
            "#,
        )?;
        Ok(())
    }

    /// Location of the database file, `None` for in-memory stores
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn row_to_card(row: &rusqlite::Row<'_>) -> rusqlite::Result<Flashcard> {
        Ok(Flashcard {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            box_number: row.get(3)?,
        })
    }

    fn ensure_exists(&self, id: i64) -> Result<()> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT id FROM flashcards WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        found.map(|_| ()).ok_or(StoreError::NotFound(id))
    }
}

impl CardStore for SqliteCardStore {
    fn create(&mut self, question: &str, answer: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO flashcards (question, answer, box_number) VALUES (?1, ?2, ?3)",
            params![question, answer, FIRST_BOX],
        )?;
        let id = self.conn.last_insert_rowid();
        log::info!("Created flashcard {}", id);
        Ok(id)
    }

    fn get(&self, id: i64) -> Result<Flashcard> {
        self.conn
            .query_row(
                "SELECT id, question, answer, box_number FROM flashcards WHERE id = ?1",
                params![id],
                Self::row_to_card,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    fn get_by_box(&self, box_number: u8) -> Result<Vec<Flashcard>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question, answer, box_number FROM flashcards WHERE box_number = ?1 ORDER BY id",
        )?;
        let cards = stmt
            .query_map(params![box_number], Self::row_to_card)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    fn update_fields(&mut self, id: i64, update: &CardUpdate) -> Result<()> {
        if update.is_empty() {
            return self.ensure_exists(id);
        }

        let changed = self.conn.execute(
            "UPDATE flashcards SET question = COALESCE(?1, question), answer = COALESCE(?2, answer) WHERE id = ?3",
            params![update.question, update.answer, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn set_box(&mut self, id: i64, box_number: u8) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE flashcards SET box_number = ?1 WHERE id = ?2",
            params![box_number, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        log::info!("Deleted flashcard {}", id);
        Ok(())
    }

    fn reset_all(&mut self) -> Result<usize> {
        let changed = self
            .conn
            .execute("UPDATE flashcards SET box_number = ?1", params![FIRST_BOX])?;
        log::info!("Reset {} flashcards to box {}", changed, FIRST_BOX);
        Ok(changed)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn box_counts(&self) -> Result<BoxCounts> {
        let mut stmt = self
            .conn
            .prepare("SELECT box_number, COUNT(*) FROM flashcards GROUP BY box_number")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;

        let mut counts = BoxCounts::default();
        for row in rows {
            let (box_number, count) = row?;
            match u8::try_from(box_number) {
                Ok(b) => counts.record(b, count as usize),
                Err(_) => log::warn!("Ignoring {} cards with box number {}", count, box_number),
            }
        }
        Ok(counts)
    }

    fn list_all(&self) -> Result<Vec<Flashcard>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, question, answer, box_number FROM flashcards ORDER BY id")?;
        let cards = stmt
            .query_map([], Self::row_to_card)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }
}

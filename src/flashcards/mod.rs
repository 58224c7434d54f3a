//! Leitner flashcard trainer
//!
//! This module provides:
//! - Flashcard storage (SQLite, one row per card with its box number)
//! - The Leitner box transition rule
//! - A line-based prompt channel for the operator
//! - Practice passes over boxes 1-3

pub mod algorithm;
pub mod models;
pub mod prompt;
pub mod session;
pub mod storage;

pub use algorithm::{next_box, BoxTransition, Grade};
pub use models::*;
pub use prompt::{LinePrompt, MenuChoice, Prompt, PromptError};
pub use session::{CardOutcome, PassReport, PassResult, SessionError, TrainingSession};
pub use storage::{CardStore, SqliteCardStore, StoreError};

//! One practice pass over the Leitner boxes
//!
//! Boxes are visited in ascending order. Each box is snapshotted before
//! its first card is shown, so a card promoted out of box 1 is not shown
//! again when box 2 comes up in the same pass.

use serde::Serialize;
use thiserror::Error;

use super::algorithm::{next_box, BoxTransition};
use super::models::{CardUpdate, Flashcard, ACTIVE_BOXES};
use super::prompt::{GradeChoice, ManageChoice, PracticeChoice, Prompt, PromptError};
use super::storage::{CardStore, StoreError};

pub const MSG_NO_CARDS: &str = "There is no flashcard to practice!";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// What happened to a single card during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    Skipped,
    Promoted { from: u8, to: u8 },
    Demoted { from: u8 },
    Graduated,
    Deleted,
    Edited,
    /// The store rejected the write; the card keeps its previous state
    StoreFailed,
}

/// Per-card state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardStep {
    /// Question shown, waiting for see-answer / skip / manage
    Presented,
    /// Answer shown, waiting for the learner's grade
    AnswerShown,
    /// Waiting for delete / edit
    Managing,
    Editing,
    Done(CardOutcome),
}

/// Tally of one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    pub presented: usize,
    pub skipped: usize,
    pub promoted: usize,
    pub demoted: usize,
    pub graduated: usize,
    pub deleted: usize,
    pub edited: usize,
    pub store_failures: usize,
}

impl PassReport {
    fn record(&mut self, outcome: CardOutcome) {
        match outcome {
            CardOutcome::Skipped => self.skipped += 1,
            CardOutcome::Promoted { .. } => self.promoted += 1,
            CardOutcome::Demoted { .. } => self.demoted += 1,
            CardOutcome::Graduated => self.graduated += 1,
            CardOutcome::Deleted => self.deleted += 1,
            CardOutcome::Edited => self.edited += 1,
            CardOutcome::StoreFailed => self.store_failures += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassResult {
    /// No card in any active box; nothing was asked
    NoCards,
    Completed(PassReport),
}

/// Drives a practice pass against a store and an operator prompt
pub struct TrainingSession<'a, S: CardStore, P: Prompt> {
    store: &'a mut S,
    prompt: &'a mut P,
}

impl<'a, S: CardStore, P: Prompt> TrainingSession<'a, S, P> {
    pub fn new(store: &'a mut S, prompt: &'a mut P) -> Self {
        Self { store, prompt }
    }

    /// Run one pass over boxes 1, 2 and 3.
    ///
    /// Store failures are logged and counted; they never end the pass.
    /// Closed input does.
    pub fn run_pass(&mut self) -> Result<PassResult> {
        let mut report = PassReport::default();
        match self.store.active_count() {
            Ok(0) => {
                self.prompt.say(MSG_NO_CARDS)?;
                return Ok(PassResult::NoCards);
            }
            Ok(active) => log::debug!("Starting pass with {} active cards", active),
            Err(e) => {
                log::warn!("Could not count cards, practicing anyway: {}", e);
                report.store_failures += 1;
            }
        }

        for box_number in ACTIVE_BOXES {
            let cards = match self.store.get_by_box(box_number) {
                Ok(cards) => cards,
                Err(e) => {
                    log::warn!("Skipping box {}: {}", box_number, e);
                    report.store_failures += 1;
                    continue;
                }
            };

            for card in &cards {
                log::debug!("Working with question id: {}", card.id);
                report.presented += 1;
                let outcome = self.run_card(card)?;
                report.record(outcome);
            }
        }

        Ok(PassResult::Completed(report))
    }

    fn run_card(&mut self, card: &Flashcard) -> Result<CardOutcome> {
        let mut step = CardStep::Presented;
        loop {
            step = match step {
                CardStep::Done(outcome) => return Ok(outcome),
                other => self.advance(card, other)?,
            };
        }
    }

    fn advance(&mut self, card: &Flashcard, step: CardStep) -> Result<CardStep> {
        let next = match step {
            CardStep::Presented => {
                self.prompt.say(&format!("Question: {}", card.question))?;
                match self.prompt.choose::<PracticeChoice>()? {
                    PracticeChoice::SeeAnswer => CardStep::AnswerShown,
                    PracticeChoice::Skip => CardStep::Done(CardOutcome::Skipped),
                    PracticeChoice::Manage => CardStep::Managing,
                }
            }
            CardStep::AnswerShown => {
                self.prompt.say(&format!("Answer: {}", card.answer))?;
                let GradeChoice(grade) = self.prompt.choose()?;
                CardStep::Done(self.apply_grade(card, next_box(card.box_number, grade)))
            }
            CardStep::Managing => match self.prompt.choose::<ManageChoice>()? {
                ManageChoice::Delete => CardStep::Done(self.delete(card)),
                ManageChoice::Edit => CardStep::Editing,
            },
            CardStep::Editing => {
                self.prompt.say(&format!("current question: {}", card.question))?;
                let question = self.prompt.read_text("please write a new question:", "question")?;
                self.prompt.say(&format!("current answer: {}", card.answer))?;
                let answer = self.prompt.read_text("please write a new answer:", "answer")?;

                let update = CardUpdate::both(question, answer);
                CardStep::Done(match self.store.update_fields(card.id, &update) {
                    Ok(()) => CardOutcome::Edited,
                    Err(e) => self.store_failed(card, "edit", e),
                })
            }
            CardStep::Done(outcome) => CardStep::Done(outcome),
        };
        Ok(next)
    }

    fn apply_grade(&mut self, card: &Flashcard, transition: BoxTransition) -> CardOutcome {
        if let Err(e) = self.store.set_box(card.id, transition.target_box()) {
            return self.store_failed(card, "move", e);
        }

        match transition {
            BoxTransition::Move { from, to } if to > from => CardOutcome::Promoted { from, to },
            BoxTransition::Move { from, .. } => CardOutcome::Demoted { from },
            BoxTransition::Graduate { from } => {
                log::info!("Flashcard {} graduated from box {}", card.id, from);
                CardOutcome::Graduated
            }
        }
    }

    fn delete(&mut self, card: &Flashcard) -> CardOutcome {
        match self.store.delete(card.id) {
            Ok(()) => CardOutcome::Deleted,
            Err(e) => self.store_failed(card, "delete", e),
        }
    }

    fn store_failed(&self, card: &Flashcard, action: &str, err: StoreError) -> CardOutcome {
        log::warn!("Failed to {} flashcard {}: {}", action, card.id, err);
        CardOutcome::StoreFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::BoxCounts;
    use crate::flashcards::prompt::LinePrompt;
    use crate::flashcards::storage::SqliteCardStore;
    use std::io::Cursor;

    type ScriptedPrompt = LinePrompt<Cursor<Vec<u8>>, Vec<u8>>;

    fn scripted(input: &str) -> ScriptedPrompt {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn run(store: &mut SqliteCardStore, input: &str) -> (Result<PassResult>, String) {
        let mut prompt = scripted(input);
        let result = TrainingSession::new(store, &mut prompt).run_pass();
        let output = String::from_utf8(prompt.into_writer()).unwrap();
        (result, output)
    }

    fn report(result: Result<PassResult>) -> PassReport {
        match result.unwrap() {
            PassResult::Completed(report) => report,
            PassResult::NoCards => panic!("expected a completed pass"),
        }
    }

    /// Store that accepts reads but rejects every write
    struct ReadOnlyStore(SqliteCardStore);

    impl ReadOnlyStore {
        fn rejected() -> crate::flashcards::storage::Result<()> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
    }

    impl CardStore for ReadOnlyStore {
        fn create(&mut self, question: &str, answer: &str) -> crate::flashcards::storage::Result<i64> {
            self.0.create(question, answer)
        }
        fn get(&self, id: i64) -> crate::flashcards::storage::Result<Flashcard> {
            self.0.get(id)
        }
        fn get_by_box(&self, box_number: u8) -> crate::flashcards::storage::Result<Vec<Flashcard>> {
            self.0.get_by_box(box_number)
        }
        fn update_fields(&mut self, _id: i64, _update: &CardUpdate) -> crate::flashcards::storage::Result<()> {
            Self::rejected()
        }
        fn set_box(&mut self, _id: i64, _box_number: u8) -> crate::flashcards::storage::Result<()> {
            Self::rejected()
        }
        fn delete(&mut self, _id: i64) -> crate::flashcards::storage::Result<()> {
            Self::rejected()
        }
        fn reset_all(&mut self) -> crate::flashcards::storage::Result<usize> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
        fn count(&self) -> crate::flashcards::storage::Result<usize> {
            self.0.count()
        }
        fn box_counts(&self) -> crate::flashcards::storage::Result<BoxCounts> {
            self.0.box_counts()
        }
        fn list_all(&self) -> crate::flashcards::storage::Result<Vec<Flashcard>> {
            self.0.list_all()
        }
    }

    /// Store whose counting queries always fail
    struct CountFailsStore(SqliteCardStore);

    impl CardStore for CountFailsStore {
        fn create(&mut self, question: &str, answer: &str) -> crate::flashcards::storage::Result<i64> {
            self.0.create(question, answer)
        }
        fn get(&self, id: i64) -> crate::flashcards::storage::Result<Flashcard> {
            self.0.get(id)
        }
        fn get_by_box(&self, box_number: u8) -> crate::flashcards::storage::Result<Vec<Flashcard>> {
            self.0.get_by_box(box_number)
        }
        fn update_fields(&mut self, id: i64, update: &CardUpdate) -> crate::flashcards::storage::Result<()> {
            self.0.update_fields(id, update)
        }
        fn set_box(&mut self, id: i64, box_number: u8) -> crate::flashcards::storage::Result<()> {
            self.0.set_box(id, box_number)
        }
        fn delete(&mut self, id: i64) -> crate::flashcards::storage::Result<()> {
            self.0.delete(id)
        }
        fn reset_all(&mut self) -> crate::flashcards::storage::Result<usize> {
            self.0.reset_all()
        }
        fn count(&self) -> crate::flashcards::storage::Result<usize> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
        fn box_counts(&self) -> crate::flashcards::storage::Result<BoxCounts> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
        fn list_all(&self) -> crate::flashcards::storage::Result<Vec<Flashcard>> {
            self.0.list_all()
        }
    }

    #[test]
    fn test_count_failure_does_not_end_the_pass() {
        let mut inner = SqliteCardStore::open_in_memory().unwrap();
        let id = inner.create("2+2", "4").unwrap();
        let mut store = CountFailsStore(inner);

        let mut prompt = scripted("y\ny\n");
        let result = TrainingSession::new(&mut store, &mut prompt).run_pass();

        let report = report(result);
        assert_eq!(report.presented, 1);
        assert_eq!(report.promoted, 1);
        assert_eq!(report.store_failures, 1);
        assert_eq!(store.get(id).unwrap().box_number, 2);
    }

    #[test]
    fn test_empty_store_reports_no_cards() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();

        let (result, output) = run(&mut store, "");

        assert_eq!(result.unwrap(), PassResult::NoCards);
        assert_eq!(output.trim(), MSG_NO_CARDS);
        assert!(!output.contains("press"));
    }

    #[test]
    fn test_only_graduated_cards_reports_no_cards() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let id = store.create("2+2", "4").unwrap();
        store.set_box(id, 0).unwrap();

        let (result, _) = run(&mut store, "");
        assert_eq!(result.unwrap(), PassResult::NoCards);
    }

    #[test]
    fn test_correct_answer_promotes() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let id = store.create("2+2", "4").unwrap();

        let (result, output) = run(&mut store, "y\ny\n");

        let report = report(result);
        assert_eq!(report.presented, 1);
        assert_eq!(report.promoted, 1);
        assert_eq!(store.get(id).unwrap().box_number, 2);
        assert!(output.contains("Question: 2+2"));
        assert!(output.contains("Answer: 4"));
    }

    #[test]
    fn test_incorrect_answer_demotes_to_first_box() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let id = store.create("2+2", "4").unwrap();
        store.set_box(id, 3).unwrap();

        let (result, _) = run(&mut store, "y\nn\n");

        assert_eq!(report(result).demoted, 1);
        assert_eq!(store.get(id).unwrap().box_number, 1);
    }

    #[test]
    fn test_promoted_card_is_not_shown_again_in_same_pass() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let a = store.create("A?", "a").unwrap();
        let b = store.create("B?", "b").unwrap();

        // A: see answer, correct. B: skip. Re-presenting A would run out of input.
        let (result, output) = run(&mut store, "y\ny\nn\n");

        let report = report(result);
        assert_eq!(report.presented, 2);
        assert_eq!(output.matches("Question: A?").count(), 1);
        assert_eq!(store.get(a).unwrap().box_number, 2);
        assert_eq!(store.get(b).unwrap().box_number, 1);
    }

    #[test]
    fn test_boxes_are_visited_in_ascending_order() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let late = store.create("third box", "3").unwrap();
        store.set_box(late, 3).unwrap();
        let mid = store.create("second box", "2").unwrap();
        store.set_box(mid, 2).unwrap();
        store.create("first box", "1").unwrap();

        let (result, output) = run(&mut store, "n\nn\nn\n");

        assert_eq!(report(result).skipped, 3);
        let first = output.find("Question: first box").unwrap();
        let second = output.find("Question: second box").unwrap();
        let third = output.find("Question: third box").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_card_graduates_after_three_correct_passes() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let id = store.create("2+2", "4").unwrap();

        run(&mut store, "y\ny\n").0.unwrap();
        assert_eq!(store.get(id).unwrap().box_number, 2);

        run(&mut store, "y\ny\n").0.unwrap();
        assert_eq!(store.get(id).unwrap().box_number, 3);

        let (result, _) = run(&mut store, "y\ny\n");
        assert_eq!(report(result).graduated, 1);
        assert!(store.get(id).unwrap().is_graduated());

        // Graduated cards stay stored but are never practiced again
        assert_eq!(store.count().unwrap(), 1);
        let (result, output) = run(&mut store, "");
        assert_eq!(result.unwrap(), PassResult::NoCards);
        assert!(!output.contains("Question: 2+2"));
    }

    #[test]
    fn test_graduated_card_skipped_while_others_practice() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let done = store.create("done", "x").unwrap();
        store.set_box(done, 0).unwrap();
        store.create("todo", "y").unwrap();

        let (result, output) = run(&mut store, "n\n");

        assert_eq!(report(result).presented, 1);
        assert!(!output.contains("Question: done"));
    }

    #[test]
    fn test_edit_changes_text_but_not_box() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let id = store.create("2+2", "4").unwrap();
        store.set_box(id, 2).unwrap();

        let (result, output) = run(&mut store, "u\ne\n \n3+3\n\n6\n");

        assert_eq!(report(result).edited, 1);
        let card = store.get(id).unwrap();
        assert_eq!(card.question, "3+3");
        assert_eq!(card.answer, "6");
        assert_eq!(card.box_number, 2);
        assert!(output.contains("current question: 2+2"));
        assert!(output.contains("current answer: 4"));
    }

    #[test]
    fn test_delete_from_manage_menu() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let id = store.create("2+2", "4").unwrap();

        let (result, _) = run(&mut store, "u\nd\n");

        assert_eq!(report(result).deleted, 1);
        assert!(store.get(id).unwrap_err().is_not_found());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_invalid_menu_input_reprompts() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        let id = store.create("2+2", "4").unwrap();

        let (result, output) = run(&mut store, "maybe\ny\nyes\nn\n");

        assert_eq!(report(result).demoted, 1);
        assert_eq!(store.get(id).unwrap().box_number, 1);
        assert!(output.contains("maybe is not an option"));
        assert!(output.contains("yes is not an option"));
    }

    #[test]
    fn test_store_failures_do_not_end_the_pass() {
        let mut inner = SqliteCardStore::open_in_memory().unwrap();
        let a = inner.create("A?", "a").unwrap();
        let b = inner.create("B?", "b").unwrap();
        let mut store = ReadOnlyStore(inner);

        let mut prompt = scripted("y\ny\nu\nd\n");
        let result = TrainingSession::new(&mut store, &mut prompt).run_pass();

        let report = report(result);
        assert_eq!(report.presented, 2);
        assert_eq!(report.store_failures, 2);
        assert_eq!(store.get(a).unwrap().box_number, 1);
        assert!(store.get(b).is_ok());
    }

    #[test]
    fn test_closed_input_ends_pass_with_error() {
        let mut store = SqliteCardStore::open_in_memory().unwrap();
        store.create("2+2", "4").unwrap();

        let (result, _) = run(&mut store, "y\n");

        assert!(matches!(result, Err(SessionError::Prompt(PromptError::Closed))));
    }
}

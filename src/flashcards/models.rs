//! Data models for the flashcard system

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker box for cards that left the active rotation
pub const GRADUATED_BOX: u8 = 0;

/// Box every new or demoted card lands in
pub const FIRST_BOX: u8 = 1;

/// Highest active box; a correct answer here graduates the card
pub const LAST_BOX: u8 = 3;

/// Boxes visited by a practice pass, in order
pub const ACTIVE_BOXES: [u8; 3] = [1, 2, 3];

/// A flashcard with a question and its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// 1-3 while active, 0 once graduated
    pub box_number: u8,
}

impl Flashcard {
    pub fn is_graduated(&self) -> bool {
        self.box_number == GRADUATED_BOX
    }
}

/// Partial update of a card's text. Box membership is never touched here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl CardUpdate {
    pub fn both(question: String, answer: String) -> Self {
        Self {
            question: Some(question),
            answer: Some(answer),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none()
    }
}

/// Number of cards per box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxCounts {
    pub graduated: usize,
    pub first: usize,
    pub second: usize,
    pub third: usize,
}

impl BoxCounts {
    /// Add `count` cards in `box_number`. Values outside 0-3 are ignored.
    pub fn record(&mut self, box_number: u8, count: usize) {
        match box_number {
            0 => self.graduated += count,
            1 => self.first += count,
            2 => self.second += count,
            3 => self.third += count,
            _ => {}
        }
    }

    /// Cards still in rotation
    pub fn active(&self) -> usize {
        self.first + self.second + self.third
    }

    pub fn total(&self) -> usize {
        self.active() + self.graduated
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Check a question or answer typed by the operator.
///
/// Rejects empty and whitespace-only text. The line terminator is stripped,
/// everything else is kept as typed.
pub fn validate_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim_end_matches(['\n', '\r']);
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_rejects_blank() {
        assert_eq!(validate_text("question", ""), Err(ValidationError::Empty("question")));
        assert_eq!(validate_text("question", " "), Err(ValidationError::Empty("question")));
        assert_eq!(validate_text("answer", "\t \n"), Err(ValidationError::Empty("answer")));
    }

    #[test]
    fn test_validate_text_keeps_content() {
        assert_eq!(validate_text("question", "2+2\n").unwrap(), "2+2");
        assert_eq!(validate_text("answer", "  four").unwrap(), "  four");
    }

    #[test]
    fn test_box_counts() {
        let mut counts = BoxCounts::default();
        counts.record(0, 2);
        counts.record(1, 3);
        counts.record(3, 1);
        counts.record(7, 5);

        assert_eq!(counts.active(), 4);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.second, 0);
    }

    #[test]
    fn test_flashcard_serializes_camel_case() {
        let card = Flashcard {
            id: 1,
            question: "2+2".to_string(),
            answer: "4".to_string(),
            box_number: 1,
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["boxNumber"], 1);
        assert!(!card.is_graduated());
    }
}

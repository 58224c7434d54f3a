//! Leitner box scheduling
//!
//! Cards live in three boxes. A correct answer moves a card one box up,
//! a wrong answer sends it back to the first box, and a correct answer
//! from the last box graduates it out of rotation (box 0).

use serde::{Deserialize, Serialize};

use super::models::{FIRST_BOX, GRADUATED_BOX, LAST_BOX};

/// How the learner graded their own recall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    Correct,
    Incorrect,
}

/// Result of applying a grade to a card's box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxTransition {
    /// Card moves to another active box (possibly the same one, for a
    /// wrong answer in box 1)
    Move { from: u8, to: u8 },
    /// Correct answer from the last box
    Graduate { from: u8 },
}

impl BoxTransition {
    /// Box value to persist for this transition
    pub fn target_box(&self) -> u8 {
        match self {
            Self::Move { to, .. } => *to,
            Self::Graduate { .. } => GRADUATED_BOX,
        }
    }
}

/// Calculate where a card goes after being graded
pub fn next_box(current: u8, grade: Grade) -> BoxTransition {
    match grade {
        Grade::Incorrect => BoxTransition::Move {
            from: current,
            to: FIRST_BOX,
        },
        Grade::Correct if current >= LAST_BOX => BoxTransition::Graduate { from: current },
        Grade::Correct => BoxTransition::Move {
            from: current,
            to: current + 1,
        },
    }
}

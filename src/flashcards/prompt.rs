//! Line-based prompt/response channel between the trainer and the operator

use std::io::{BufRead, Write};

use thiserror::Error;

use super::algorithm::Grade;
use super::models::validate_text;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, PromptError>;

/// A fixed menu of single-token answers
pub trait MenuChoice: Sized {
    /// Lines printed before reading the answer
    fn menu() -> &'static [&'static str];

    fn from_token(token: &str) -> Option<Self>;
}

/// Prompt shown after a question: `y` / `n` / `u`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeChoice {
    SeeAnswer,
    Skip,
    Manage,
}

impl MenuChoice for PracticeChoice {
    fn menu() -> &'static [&'static str] {
        &[
            r#"press "y" to see the answer:"#,
            r#"press "n" to skip:"#,
            r#"press "u" to update:"#,
        ]
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "y" => Some(Self::SeeAnswer),
            "n" => Some(Self::Skip),
            "u" => Some(Self::Manage),
            _ => None,
        }
    }
}

/// Self-grading after the answer was shown: `y` / `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeChoice(pub Grade);

impl MenuChoice for GradeChoice {
    fn menu() -> &'static [&'static str] {
        &[
            r#"press "y" if your answer is correct:"#,
            r#"press "n" if your answer is wrong:"#,
        ]
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "y" => Some(Self(Grade::Correct)),
            "n" => Some(Self(Grade::Incorrect)),
            _ => None,
        }
    }
}

/// Card management: `d` / `e`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageChoice {
    Delete,
    Edit,
}

impl MenuChoice for ManageChoice {
    fn menu() -> &'static [&'static str] {
        &[
            r#"press "d" to delete the flashcard:"#,
            r#"press "e" to edit the flashcard:"#,
        ]
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "d" => Some(Self::Delete),
            "e" => Some(Self::Edit),
            _ => None,
        }
    }
}

/// Operator interaction channel.
///
/// Implementors only provide raw line output and input; menus and
/// free-text validation are built on top.
pub trait Prompt {
    fn say(&mut self, line: &str) -> Result<()>;

    /// Read one line without its terminator. End of input is `PromptError::Closed`.
    fn read_line(&mut self) -> Result<String>;

    /// Show the menu and read until one of its tokens is entered exactly.
    /// Invalid input is reported and the menu is shown again.
    fn choose<C: MenuChoice>(&mut self) -> Result<C> {
        loop {
            for line in C::menu() {
                self.say(line)?;
            }
            let input = self.read_line()?;
            if let Some(choice) = C::from_token(&input) {
                return Ok(choice);
            }
            self.say(&format!("{} is not an option", input))?;
        }
    }

    /// Ask for free text until a non-blank line is entered
    fn read_text(&mut self, label: &str, field: &'static str) -> Result<String> {
        loop {
            self.say(label)?;
            let input = self.read_line()?;
            match validate_text(field, &input) {
                Ok(text) => return Ok(text),
                Err(e) => log::debug!("Rejected input: {}", e),
            }
        }
    }
}

/// Prompt over any buffered reader and writer (stdin/stdout in the CLI)
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        self.writer.flush()?;
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Err(PromptError::Closed);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(buf)
    }
}

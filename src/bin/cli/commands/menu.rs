use anyhow::Result;

use leitner_lib::flashcards::{
    LinePrompt, MenuChoice, PassResult, Prompt, PromptError, SessionError, TrainingSession,
};

use crate::app::App;
use crate::commands::practice::summary_lines;
use crate::render::terminal::{paint, Color};

const MSG_EXIT: &str = "Bye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainMenu {
    Add,
    Practice,
    Reset,
    Exit,
}

impl MenuChoice for MainMenu {
    fn menu() -> &'static [&'static str] {
        &[
            "1. Add flashcards",
            "2. Practice flashcards",
            "3. Reset stats",
            "0. Exit",
        ]
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(Self::Add),
            "2" => Some(Self::Practice),
            "3" => Some(Self::Reset),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddMenu {
    New,
    Back,
}

impl MenuChoice for AddMenu {
    fn menu() -> &'static [&'static str] {
        &["1. Add a new flashcard", "2. Exit"]
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(Self::New),
            "2" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Interactive main menu on stdin/stdout
pub fn run(app: &mut App, use_color: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let mut prompt = LinePrompt::new(stdin.lock(), std::io::stdout());
    drive(app, &mut prompt, use_color)
}

/// Run the menu until `0` is chosen or input is closed
fn drive<P: Prompt>(app: &mut App, prompt: &mut P, use_color: bool) -> Result<()> {
    match menu_loop(app, prompt) {
        Ok(()) | Err(PromptError::Closed) => {
            prompt.say("")?;
            prompt.say(&paint(MSG_EXIT, Color::BOLD, use_color))?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn menu_loop<P: Prompt>(app: &mut App, prompt: &mut P) -> Result<(), PromptError> {
    loop {
        match prompt.choose::<MainMenu>()? {
            MainMenu::Add => add_loop(app, prompt)?,
            MainMenu::Practice => {
                let result = TrainingSession::new(&mut app.store, prompt).run_pass();
                match result {
                    Ok(PassResult::Completed(report)) => {
                        for line in summary_lines(&report) {
                            prompt.say(&line)?;
                        }
                    }
                    Ok(PassResult::NoCards) => {}
                    Err(SessionError::Prompt(e)) => return Err(e),
                    Err(SessionError::Store(e)) => log::warn!("Practice pass failed: {}", e),
                }
            }
            MainMenu::Reset => {
                if let Err(e) = app.reset_boxes() {
                    log::warn!("{:#}", e);
                }
            }
            MainMenu::Exit => return Ok(()),
        }
        prompt.say("")?;
    }
}

fn add_loop<P: Prompt>(app: &mut App, prompt: &mut P) -> Result<(), PromptError> {
    loop {
        match prompt.choose::<AddMenu>()? {
            AddMenu::New => {
                let question = prompt.read_text("Question:", "question")?;
                let answer = prompt.read_text("Answer:", "answer")?;
                if let Err(e) = app.add_card(&question, &answer) {
                    log::warn!("{:#}", e);
                }
            }
            AddMenu::Back => return Ok(()),
        }
    }
}

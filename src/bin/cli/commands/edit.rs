use anyhow::{bail, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    id: i64,
    question: Option<String>,
    answer: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    if question.is_none() && answer.is_none() {
        bail!("Nothing to change: pass --question and/or --answer");
    }

    let card = app.edit_card(id, question.as_deref(), answer.as_deref())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Updated flashcard {}", card.id);
            println!("  Question: {}", card.question);
            println!("  Answer: {}", card.answer);
        }
    }

    Ok(())
}

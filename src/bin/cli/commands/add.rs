use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, question: &str, answer: &str, format: &OutputFormat) -> Result<()> {
    let card = app.add_card(question, answer)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added flashcard \"{}\" to box {}", card.question, card.box_number);
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}

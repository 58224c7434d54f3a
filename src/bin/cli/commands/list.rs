use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{box_color, box_label, paint, truncate};
use crate::OutputFormat;

pub fn run(app: &App, box_number: Option<u8>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app.list_cards(box_number)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                match box_number {
                    Some(b) => println!("No flashcards in {}.", box_label(b)),
                    None => println!("No flashcards."),
                }
                return Ok(());
            }

            let id_width = cards.iter().map(|c| c.id.to_string().len()).max().unwrap_or(2).max(2);
            let question_width = cards
                .iter()
                .map(|c| c.question.chars().count())
                .max()
                .unwrap_or(8)
                .clamp(8, 40);
            let box_width = 10;

            println!("{:<iw$} {:<bw$} {:<qw$} {}",
                "ID", "Box", "Question", "Answer",
                iw = id_width, bw = box_width, qw = question_width);
            println!("{} {} {} {}",
                "\u{2500}".repeat(id_width),
                "\u{2500}".repeat(box_width),
                "\u{2500}".repeat(question_width),
                "\u{2500}".repeat(10));

            for card in &cards {
                let label = format!("{:<bw$}", box_label(card.box_number), bw = box_width);
                println!("{:<iw$} {} {:<qw$} {}",
                    card.id,
                    paint(&label, box_color(card.box_number), use_color),
                    truncate(&card.question, question_width),
                    truncate(&card.answer, 40),
                    iw = id_width, qw = question_width);
            }

            println!("\n{} flashcards total", cards.len());
        }
    }

    Ok(())
}

use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, format: &OutputFormat) -> Result<()> {
    let reset = app.reset_boxes()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "reset": reset });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Moved {} flashcards back to box 1", reset);
        }
    }

    Ok(())
}

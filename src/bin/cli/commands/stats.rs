use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{box_color, box_label, paint};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let counts = app.box_counts()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "boxes": counts,
                "active": counts.active(),
                "total": counts.total(),
                "database": app.config.database_path.to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let rows = [
                (1, counts.first),
                (2, counts.second),
                (3, counts.third),
                (0, counts.graduated),
            ];
            for (box_number, count) in rows {
                let label = format!("{:<10}", box_label(box_number));
                println!("{} {}", paint(&label, box_color(box_number), use_color), count);
            }
            println!("{} {}", "\u{2500}".repeat(10), "\u{2500}".repeat(6));
            println!("{:<10} {}", "active", counts.active());
            println!("{:<10} {}", "total", counts.total());
            println!("\nDatabase: {}", app.config.database_path.display());
        }
    }

    Ok(())
}

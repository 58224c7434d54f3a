use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use leitner_lib::flashcards::{LinePrompt, PassReport, PassResult, TrainingSession};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, format: &OutputFormat) -> Result<()> {
    let stdin = std::io::stdin();

    match format {
        OutputFormat::Json => {
            // Questions go to stderr so stdout carries only the report
            let result = practice(app, stdin.lock(), std::io::stderr())?;
            println!("{}", render_json(result)?);
        }
        OutputFormat::Plain => {
            if let PassResult::Completed(report) = practice(app, stdin.lock(), std::io::stdout())? {
                print_summary(&report);
            }
        }
    }

    Ok(())
}

/// Run one pass reading answers from `reader` and writing prompts to `writer`
fn practice<R: BufRead, W: Write>(app: &mut App, reader: R, writer: W) -> Result<PassResult> {
    let mut prompt = LinePrompt::new(reader, writer);
    TrainingSession::new(&mut app.store, &mut prompt)
        .run_pass()
        .context("Practice pass failed")
}

fn render_json(result: PassResult) -> Result<String> {
    let report = match result {
        PassResult::NoCards => PassReport::default(),
        PassResult::Completed(report) => report,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn print_summary(report: &PassReport) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}

pub fn summary_lines(report: &PassReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("Practiced {} flashcards", report.presented),
        format!(
            "  {} up, {} back to box 1, {} graduated, {} skipped",
            report.promoted, report.demoted, report.graduated, report.skipped
        ),
    ];
    if report.edited > 0 || report.deleted > 0 {
        lines.push(format!("  {} edited, {} deleted", report.edited, report.deleted));
    }
    if report.store_failures > 0 {
        lines.push(format!("  {} changes could not be saved (see log)", report.store_failures));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use leitner_lib::flashcards::CardStore;
    use leitner_lib::Config;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            database_path: temp_dir.path().join("flashcard.db"),
        };
        (App::open(config).unwrap(), temp_dir)
    }

    #[test]
    fn test_json_report_is_kept_apart_from_prompts() {
        let (mut app, _temp) = create_test_app();
        let id = app.store.create("2+2", "4").unwrap();

        let mut prompts = Vec::new();
        let result = practice(&mut app, Cursor::new(b"y\ny\n".to_vec()), &mut prompts).unwrap();
        let json = render_json(result).unwrap();

        let report: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(report["presented"], 1);
        assert_eq!(report["promoted"], 1);
        assert!(!json.contains("Question"));

        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.contains("Question: 2+2"));
        assert_eq!(app.store.get(id).unwrap().box_number, 2);
    }

    #[test]
    fn test_json_report_for_empty_store() {
        let (mut app, _temp) = create_test_app();

        let mut prompts = Vec::new();
        let result = practice(&mut app, Cursor::new(Vec::new()), &mut prompts).unwrap();
        assert_eq!(result, PassResult::NoCards);

        let report: serde_json::Value = serde_json::from_str(&render_json(result).unwrap()).unwrap();
        assert_eq!(report["presented"], 0);
    }

    #[test]
    fn test_summary_mentions_failures_only_when_present() {
        let report = PassReport {
            presented: 2,
            promoted: 1,
            skipped: 1,
            ..Default::default()
        };
        let lines = summary_lines(&report);
        assert!(lines.iter().any(|l| l == "Practiced 2 flashcards"));
        assert!(!lines.iter().any(|l| l.contains("could not be saved")));

        let failed = PassReport { store_failures: 1, ..report };
        assert!(summary_lines(&failed).iter().any(|l| l.contains("could not be saved")));
    }
}

mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "leitner", about = "Leitner box flashcard trainer", version)]
struct Cli {
    /// Use a specific database file (overrides LEITNER_DB and the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new flashcard to the first box
    Add {
        question: String,
        answer: String,
    },

    /// Run one practice pass over boxes 1-3
    Practice,

    /// Move every card back to the first box
    Reset,

    /// Show how many cards are in each box
    Stats,

    /// List flashcards
    List {
        /// Only cards in this box (0 lists graduated cards)
        #[arg(long = "box")]
        box_number: Option<u8>,
    },

    /// Change the question and/or answer of a card
    Edit {
        id: i64,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
    },

    /// Delete a flashcard
    Delete {
        id: i64,
    },

    /// Interactive menu (default when no subcommand is given)
    Menu,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.db)?;

    match cli.command {
        None | Some(Command::Menu) => {
            commands::menu::run(&mut app, use_color)?;
        }
        Some(Command::Add { question, answer }) => {
            commands::add::run(&mut app, &question, &answer, &cli.format)?;
        }
        Some(Command::Practice) => {
            commands::practice::run(&mut app, &cli.format)?;
        }
        Some(Command::Reset) => {
            commands::reset::run(&mut app, &cli.format)?;
        }
        Some(Command::Stats) => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Some(Command::List { box_number }) => {
            commands::list::run(&app, box_number, &cli.format, use_color)?;
        }
        Some(Command::Edit { id, question, answer }) => {
            commands::edit::run(&mut app, id, question, answer, &cli.format)?;
        }
        Some(Command::Delete { id }) => {
            commands::delete::run(&mut app, id, &cli.format)?;
        }
    }

    Ok(())
}

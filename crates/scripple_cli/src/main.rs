//! CLI driver for the note list.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `scripple_core` linkage.
//! - Drive menu-level use cases from a terminal for local sanity checks.
//!
//! Rows follow the watch menu: row 0 is the add affordance, notes start at 1.

use clap::{Parser, Subcommand};
use scripple_core::db::open_db;
use scripple_core::{AppConfig, MenuAction, MenuRow, ScrippleService, SqliteSnapshotRepository};
use std::error::Error;
use std::process::ExitCode;

/// Scripple note list driver. Prints ping and version when run without a command.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show every menu row, the add row included.
    List,
    /// Append a note; words are joined with single spaces.
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the full text of the note on `row`.
    View { row: usize },
    /// Delete the note on `row` (a long press on the watch).
    Delete { row: usize },
}

fn main() -> ExitCode {
    let Some(command) = Cli::parse().command else {
        println!("scripple_core ping={}", scripple_core::ping());
        println!("scripple_core version={}", scripple_core::core_version());
        return ExitCode::SUCCESS;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env();
    let mut conn = open_db(&config.db_path)?;
    let repo = SqliteSnapshotRepository::try_new(&mut conn)?;
    let mut service = ScrippleService::start(repo, config.capacity)?;

    match command {
        Command::List => {
            for row in 0..service.row_count() {
                match service.row(row) {
                    Some(MenuRow::Add) => println!("{row:>2}  +"),
                    Some(MenuRow::Note(text)) => println!("{row:>2}  {text}"),
                    None => {}
                }
            }
            println!(
                "{} of {} note(s)",
                service.store().len(),
                service.store().capacity()
            );
        }
        Command::Add { text } => {
            let index = service.add_note(text.join(" "))?;
            service.shutdown()?;
            println!("added row {}", index + 1);
        }
        Command::View { row } => match service.select_row(row)? {
            MenuAction::ShowDetail { text } => println!("{text}"),
            MenuAction::StartDictation => println!("row 0 starts dictation; use `add <text>`"),
        },
        Command::Delete { row } => {
            if service.long_select_row(row)? {
                service.shutdown()?;
                println!("deleted row {row}");
            } else {
                println!("row 0 cannot be deleted");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_selects_linkage_check() {
        let cli = Cli::try_parse_from(["scripple_cli"]).expect("empty args should parse");
        assert_eq!(cli.command, None);
    }

    #[test]
    fn add_collects_all_words() {
        let cli = Cli::try_parse_from(["scripple_cli", "add", "buy", "milk"])
            .expect("add should parse");
        assert_eq!(
            cli.command,
            Some(Command::Add {
                text: vec!["buy".to_string(), "milk".to_string()]
            })
        );
    }

    #[test]
    fn add_without_text_is_rejected() {
        assert!(Cli::try_parse_from(["scripple_cli", "add"]).is_err());
    }

    #[test]
    fn rows_parse_as_unsigned_numbers() {
        let view = Cli::try_parse_from(["scripple_cli", "view", "2"]).expect("view should parse");
        assert_eq!(view.command, Some(Command::View { row: 2 }));
        let delete =
            Cli::try_parse_from(["scripple_cli", "delete", "1"]).expect("delete should parse");
        assert_eq!(delete.command, Some(Command::Delete { row: 1 }));

        assert!(Cli::try_parse_from(["scripple_cli", "delete", "-1"]).is_err());
        assert!(Cli::try_parse_from(["scripple_cli", "view", "first"]).is_err());
    }
}

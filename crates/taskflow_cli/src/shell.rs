//! Interactive shell. View selection, calendar month, search text and a
//! pending delete survive between lines.

use crate::commands::{confirm_pending, execute, Board, BoardCommand, DeleteConfirmation};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use log::warn;
use std::io::{BufRead, Write};
use taskflow_core::ViewKind;

const PROMPT: &str = "taskflow> ";

#[derive(Debug, Parser)]
#[command(name = "taskflow", no_binary_name = true, disable_help_subcommand = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Board(BoardCommand),

    /// Switch the active view and render it
    View { view: ViewKind },

    /// Previous calendar month
    Prev,

    /// Next calendar month
    Next,

    /// Delete the task awaiting confirmation
    Confirm,

    /// Keep the task awaiting confirmation
    Cancel,

    /// List shell commands
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
enum LineError {
    Quoting(shell_words::ParseError),
    Usage(clap::Error),
}

/// Tokenizes `line` with POSIX shell quoting and parses it. Blank lines
/// yield `None`.
fn parse_line(line: &str) -> Result<Option<ShellCommand>, LineError> {
    let words = shell_words::split(line).map_err(LineError::Quoting)?;
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(LineError::Usage)
}

pub fn run(board: &mut Board) -> Result<()> {
    println!("TaskFlow shell. Type `help` for commands, `quit` to leave.");
    print!("{}", board.render()?);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{PROMPT}");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.context("failed to read shell input")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(LineError::Quoting(err)) => {
                eprintln!("error: {err}");
                continue;
            }
            Err(LineError::Usage(err)) => {
                if let Err(io) = err.print() {
                    warn!("event=shell_usage module=cli status=error error={io}");
                }
                continue;
            }
        };

        match dispatch(board, command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(err) => eprintln!("error: {err:#}"),
        }
    }
}

fn dispatch(board: &mut Board, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::Board(command) => execute(board, command, DeleteConfirmation::Deferred)?,
        ShellCommand::View { view } => print!("{}", board.switch_view(view)?),
        ShellCommand::Prev => print!("{}", board.previous_month()?),
        ShellCommand::Next => print!("{}", board.next_month()?),
        ShellCommand::Confirm => confirm_pending(board)?,
        ShellCommand::Cancel => {
            board.cancel_delete();
            println!("Delete cancelled");
        }
        ShellCommand::Help => ShellLine::command()
            .print_help()
            .context("failed to print help")?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

//! `taskflow` command-line task board.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the SQLite-backed board.
//! - Run one board action per invocation, or an interactive shell.

mod commands;
mod config;
mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{BoardCommand, DeleteConfirmation};
use config::{AppConfig, ConfigFlags};
use log::{info, warn};
use std::path::PathBuf;
use std::rc::Rc;
use taskflow_core::{
    init_logging, KvTaskRepository, Preferences, SqliteKvStorage, TaskBoard, TaskStore,
};

#[derive(Parser)]
#[command(name = "taskflow", version)]
#[command(about = "Kanban-style task board stored in a local SQLite file")]
struct Cli {
    /// Database file [env: TASKFLOW_DB]
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for rolling log files [env: TASKFLOW_LOG_DIR]
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace | debug | info | warn | error [env: TASKFLOW_LOG_LEVEL]
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Do not add demo tasks to an empty board on startup
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Board(BoardCommand),

    /// Interactive session that keeps view state between commands
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(ConfigFlags {
        db: cli.db,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    })?;

    // The board works without logs.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut board = open_board(&config)?;
    if !cli.no_seed && board.seed_if_empty()? {
        info!("event=cli_seed module=cli status=ok");
    }

    match cli.cmd {
        Some(Command::Board(command)) => {
            commands::execute(&mut board, command, DeleteConfirmation::Prompt)?
        }
        Some(Command::Shell) => shell::run(&mut board)?,
        None => commands::execute(
            &mut board,
            BoardCommand::Board { search: None },
            DeleteConfirmation::Prompt,
        )?,
    }
    Ok(())
}

fn open_board(config: &AppConfig) -> Result<commands::Board> {
    config.ensure_db_parent()?;
    let storage = SqliteKvStorage::open(&config.db_path)
        .map(Rc::new)
        .with_context(|| format!("failed to open board at `{}`", config.db_path.display()))
        .inspect_err(|err| warn!("event=cli_open module=cli status=error error={err}"))?;

    let store = TaskStore::new(KvTaskRepository::new(Rc::clone(&storage)));
    let board = TaskBoard::open(store, Preferences::new(storage))
        .context("failed to load tasks")?;
    Ok(board)
}

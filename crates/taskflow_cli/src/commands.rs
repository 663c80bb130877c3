//! Board actions shared by one-shot invocations and the interactive shell.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::io::{BufRead, Write};
use std::rc::Rc;
use taskflow_core::{
    KvTaskRepository, SqliteKvStorage, Task, TaskBoard, TaskForm, TaskStatus, Theme,
};

pub type Board = TaskBoard<KvTaskRepository<Rc<SqliteKvStorage>>, Rc<SqliteKvStorage>>;

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Show the kanban board
    Board {
        /// Only show tasks matching this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show every task as a table
    List,

    /// Show the month calendar with due dates
    Calendar {
        /// Month to display, YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },

    /// Show status/priority counters and charts
    Analytics {
        /// Print chart configurations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-status counters
    Stats,

    /// Create a task
    Add {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id or unique id prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },

    /// Show one task in full
    Show { id: String },

    /// Move a task to another column
    Move { id: String, status: TaskStatus },

    /// Delete a task after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Filter the board by text in title, description or tags
    Search { query: String },

    /// Show, set or toggle the color theme
    Theme { choice: Option<ThemeChoice> },

    /// Add the demo tasks when the board is empty
    Seed,
}

/// Optional form fields shared by `add` and `edit`.
#[derive(Debug, Args)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    /// low | medium | high
    #[arg(long)]
    pub priority: Option<String>,
    /// todo | progress | review | completed
    #[arg(long)]
    pub status: Option<String>,
    /// YYYY-MM-DD, empty to clear
    #[arg(long)]
    pub due: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

impl TaskFields {
    fn into_form(self, title: Option<String>) -> TaskForm {
        TaskForm {
            title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            due_date: self.due,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

/// How `delete` obtains its confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// Ask on stdin before deleting.
    Prompt,
    /// Leave the delete pending for a later `confirm` or `cancel`.
    Deferred,
}

pub fn execute(
    board: &mut Board,
    command: BoardCommand,
    confirmation: DeleteConfirmation,
) -> Result<()> {
    match command {
        BoardCommand::Board { search } => {
            println!("{}", board.stats()?);
            println!();
            let view = match search {
                Some(query) => board.search(&query)?,
                None => board.render_board()?,
            };
            print!("{view}");
        }
        BoardCommand::List => print!("{}", board.render_list()?),
        BoardCommand::Calendar { month } => {
            let view = match month {
                Some(month) => board.show_month(parse_month(&month)?)?,
                None => board.render_calendar()?,
            };
            print!("{view}");
        }
        BoardCommand::Analytics { json } => {
            if json {
                let charts = board.charts().charts();
                let rendered = serde_json::to_string_pretty(&charts)
                    .context("failed to serialize chart configurations")?;
                println!("{rendered}");
            } else {
                print!("{}", board.render_analytics()?);
            }
        }
        BoardCommand::Stats => println!("{}", board.stats()?),
        BoardCommand::Add { title, fields } => {
            if let Some((task, toast)) = board.submit(None, &fields.into_form(Some(title)))? {
                println!("{toast} ({})", task.id);
            }
        }
        BoardCommand::Edit { id, title, fields } => {
            let id = board.resolve_id(&id)?;
            let Some(current) = board.edit_form(&id)? else {
                println!("Task {id} no longer exists");
                return Ok(());
            };
            let form = current.with_overrides(fields.into_form(title));
            match board.submit(Some(&id), &form)? {
                Some((_, toast)) => println!("{toast}"),
                None => println!("Task {id} no longer exists"),
            }
        }
        BoardCommand::Show { id } => {
            let id = board.resolve_id(&id)?;
            let task = board
                .store()
                .get_by_id(&id)?
                .ok_or_else(|| anyhow!("task {id} not found"))?;
            print_task(&task);
        }
        BoardCommand::Move { id, status } => {
            let id = board.resolve_id(&id)?;
            match board.move_task(&id, status)? {
                Some(toast) => println!("{toast}"),
                None => println!("Task {id} no longer exists"),
            }
        }
        BoardCommand::Delete { id, yes } => {
            let id = board.resolve_id(&id)?;
            let Some(task) = board.request_delete(&id)? else {
                println!("Task {id} no longer exists");
                return Ok(());
            };
            if yes {
                confirm_pending(board)?;
            } else {
                match confirmation {
                    DeleteConfirmation::Prompt => {
                        if ask_yes_no(&format!("Delete \"{}\"? [y/N] ", task.title))? {
                            confirm_pending(board)?;
                        } else {
                            board.cancel_delete();
                            println!("Kept \"{}\"", task.title);
                        }
                    }
                    DeleteConfirmation::Deferred => println!(
                        "Delete \"{}\"? Type `confirm` to delete or `cancel` to keep it.",
                        task.title
                    ),
                }
            }
        }
        BoardCommand::Search { query } => print!("{}", board.search(&query)?),
        BoardCommand::Theme { choice } => {
            let theme = match choice {
                None => board.theme()?,
                Some(ThemeChoice::Toggle) => board.toggle_theme()?,
                Some(ThemeChoice::Light) => {
                    board.set_theme(Theme::Light)?;
                    Theme::Light
                }
                Some(ThemeChoice::Dark) => {
                    board.set_theme(Theme::Dark)?;
                    Theme::Dark
                }
            };
            println!("Theme: {theme}");
        }
        BoardCommand::Seed => {
            if board.seed_if_empty()? {
                println!("Added demo tasks");
            } else {
                println!("Board already has tasks; nothing seeded");
            }
        }
    }
    Ok(())
}

/// Deletes the pending task, if any.
pub fn confirm_pending(board: &mut Board) -> Result<()> {
    match board.confirm_delete()? {
        Some(toast) => println!("{toast}"),
        None => println!("Nothing to delete"),
    }
    Ok(())
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .with_context(|| format!("invalid month `{raw}`; expected YYYY-MM"))
}

fn print_task(task: &Task) {
    println!("{}", task.title);
    println!("  id:       {}", task.id);
    println!("  status:   {}", task.status.label());
    println!("  priority: {}", task.priority.label());
    if let Some(due) = task.due_date {
        println!("  due:      {}", due.format("%Y-%m-%d"));
    }
    if !task.tags.is_empty() {
        println!("  tags:     {}", task.tags.join(", "));
    }
    println!(
        "  created:  {}",
        task.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(description) = task.description.as_deref().filter(|text| !text.is_empty()) {
        println!();
        println!("{description}");
    }
}

fn ask_yes_no(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

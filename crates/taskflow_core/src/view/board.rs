//! Kanban board view.

use super::format::{short_date, short_id, truncate};
use crate::model::task::{Priority, Task, TaskId, TaskStatus};
use crate::service::task_store::StatusCounts;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

const DESCRIPTION_PREVIEW_CHARS: usize = 72;

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub tags: Vec<String>,
    /// `Mar 5` style label, `None` without a due date.
    pub due_label: Option<String>,
    pub overdue: bool,
}

impl TaskCard {
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task
                .description
                .as_ref()
                .filter(|text| !text.trim().is_empty())
                .cloned(),
            priority: task.priority,
            tags: task.tags.clone(),
            due_label: task.due_date.map(short_date),
            overdue: task.is_overdue(today),
        }
    }
}

/// One status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub cards: Vec<TaskCard>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

/// Four columns in workflow order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<BoardColumn>,
    /// Set when the cards are search results rather than the full board.
    pub search_query: Option<String>,
}

impl BoardView {
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }
}

/// Distributes `tasks` over the four columns, keeping their order.
pub fn build_board(tasks: &[Task], today: NaiveDate, search_query: Option<&str>) -> BoardView {
    let columns = TaskStatus::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            cards: tasks
                .iter()
                .filter(|task| task.status == status)
                .map(|task| TaskCard::from_task(task, today))
                .collect(),
        })
        .collect();

    BoardView {
        columns,
        search_query: search_query.map(str::to_string),
    }
}

impl Display for BoardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(query) = &self.search_query {
            writeln!(f, "Search: \"{query}\"")?;
            writeln!(f)?;
        }

        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "== {} ({}) ==", column.title(), column.count())?;
            if column.cards.is_empty() {
                writeln!(f, "  (empty)")?;
            }
            for card in &column.cards {
                write_card(f, card)?;
            }
        }
        Ok(())
    }
}

fn write_card(f: &mut Formatter<'_>, card: &TaskCard) -> std::fmt::Result {
    write!(f, "  {}  [{}] {}", short_id(&card.id), card.priority, card.title)?;
    for tag in &card.tags {
        write!(f, " #{tag}")?;
    }
    if let Some(due) = &card.due_label {
        write!(f, "  due {due}")?;
        if card.overdue {
            write!(f, " (overdue)")?;
        }
    }
    writeln!(f)?;
    if let Some(description) = &card.description {
        writeln!(
            f,
            "            {}",
            truncate(description, DESCRIPTION_PREVIEW_CHARS)
        )?;
    }
    Ok(())
}

/// Per-status counters shown above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsView {
    pub counts: StatusCounts,
}

impl Display for StatsView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts = TaskStatus::ALL
            .iter()
            .map(|status| format!("{}: {}", status.label(), self.counts.get(*status)))
            .collect::<Vec<_>>();
        write!(f, "{} | Total: {}", parts.join(" | "), self.counts.total)
    }
}

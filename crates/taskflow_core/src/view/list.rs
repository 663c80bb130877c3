//! Flat list view, one row per task in storage order.

use super::format::{short_date, short_id, truncate};
use crate::model::task::{Priority, Task, TaskId, TaskStatus};
use std::fmt::{Display, Formatter};

const TITLE_COLUMN_CHARS: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: TaskId,
    pub title: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// `Mar 5` style label or `-`.
    pub due_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<ListRow>,
}

pub fn build_list(tasks: &[Task]) -> ListView {
    ListView {
        rows: tasks
            .iter()
            .map(|task| ListRow {
                id: task.id.clone(),
                title: task.title.clone(),
                priority: task.priority,
                status: task.status,
                due_label: task
                    .due_date
                    .map(short_date)
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect(),
    }
}

impl Display for ListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<8}  {:<width$}  {:<8}  {:<11}  {}",
            "ID",
            "TITLE",
            "PRIORITY",
            "STATUS",
            "DUE",
            width = TITLE_COLUMN_CHARS
        )?;
        if self.rows.is_empty() {
            writeln!(f, "(no tasks)")?;
        }
        for row in &self.rows {
            writeln!(
                f,
                "{:<8}  {:<width$}  {:<8}  {:<11}  {}",
                short_id(&row.id),
                truncate(&row.title, TITLE_COLUMN_CHARS),
                row.priority.as_str(),
                row.status.label(),
                row.due_label,
                width = TITLE_COLUMN_CHARS
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::build_list;
    use crate::model::task::{NewTask, Task, TaskId, TaskStatus};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn rows_show_status_label_and_dash_for_missing_due_date() {
        let tasks = vec![
            Task::from_new(
                TaskId::from("aaaaaaaa-1"),
                Utc::now(),
                NewTask::new("Review PR").status(TaskStatus::Review),
            ),
            Task::from_new(
                TaskId::from("bbbbbbbb-2"),
                Utc::now(),
                NewTask::new("Ship").due_date(NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()),
            ),
        ];

        let view = build_list(&tasks);
        assert_eq!(view.rows[0].due_label, "-");
        assert_eq!(view.rows[1].due_label, "Dec 24");

        let text = view.to_string();
        assert!(text.contains("In Review"));
        assert!(text.contains("aaaaaaaa"));
        assert!(!text.contains("aaaaaaaa-1"));
    }
}

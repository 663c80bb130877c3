//! Demo tasks used to populate an empty board.

use crate::model::task::{NewTask, Priority, TaskStatus};
use chrono::{Days, NaiveDate};

struct SampleTask {
    title: &'static str,
    description: &'static str,
    priority: Priority,
    status: TaskStatus,
    due_offset_days: i64,
    tags: &'static [&'static str],
}

const SAMPLE_TASKS: &[SampleTask] = &[
    SampleTask {
        title: "Design Homepage UI",
        description: "Create wireframes and mockups for the new homepage design",
        priority: Priority::High,
        status: TaskStatus::Todo,
        due_offset_days: 3,
        tags: &["design", "ui"],
    },
    SampleTask {
        title: "Setup Project Repository",
        description: "Initialize Git repo and setup project structure",
        priority: Priority::Medium,
        status: TaskStatus::Completed,
        due_offset_days: -1,
        tags: &["setup"],
    },
    SampleTask {
        title: "Implement Authentication",
        description: "Add user login and registration functionality",
        priority: Priority::High,
        status: TaskStatus::Progress,
        due_offset_days: 5,
        tags: &["backend", "security"],
    },
    SampleTask {
        title: "Write Documentation",
        description: "Create README and API documentation",
        priority: Priority::Low,
        status: TaskStatus::Review,
        due_offset_days: 7,
        tags: &["docs"],
    },
    SampleTask {
        title: "Fix Navigation Bug",
        description: "Mobile navigation not closing on click",
        priority: Priority::Medium,
        status: TaskStatus::Todo,
        due_offset_days: 2,
        tags: &["bug", "mobile"],
    },
];

/// Returns the sample tasks with due dates relative to `today`.
pub fn sample_tasks(today: NaiveDate) -> Vec<NewTask> {
    SAMPLE_TASKS
        .iter()
        .map(|sample| {
            let mut task = NewTask::new(sample.title)
                .description(sample.description)
                .priority(sample.priority)
                .status(sample.status)
                .tags(sample.tags.iter().copied());
            task.due_date = offset_date(today, sample.due_offset_days);
            task
        })
        .collect()
}

fn offset_date(today: NaiveDate, offset_days: i64) -> Option<NaiveDate> {
    let days = Days::new(offset_days.unsigned_abs());
    if offset_days >= 0 {
        today.checked_add_days(days)
    } else {
        today.checked_sub_days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::sample_tasks;
    use chrono::NaiveDate;

    #[test]
    fn due_dates_are_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let samples = sample_tasks(today);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].due_date, NaiveDate::from_ymd_opt(2026, 1, 4));
        assert_eq!(samples[1].due_date, NaiveDate::from_ymd_opt(2025, 12, 31));
    }
}

//! Chart configurations for the analytics view.
//!
//! # Responsibility
//! - Bind store aggregates to three chart configs (status, priority,
//!   weekly trend) in the JSON shape a charting front end consumes.
//! - Refresh aggregate data on demand.
//!
//! # Invariants
//! - Dataset lengths always equal label lengths.
//! - The weekly trend carries fixed placeholder series and is flagged
//!   `placeholder: true`; it is not derived from task history.

mod text;

use crate::model::task::{Priority, TaskStatus};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::{PriorityCounts, StatusCounts, StoreResult, TaskStore};
use chrono::{Days, NaiveDate};
use log::debug;
use serde::Serialize;

const STATUS_COLORS: [&str; 4] = ["#6366f1", "#f59e0b", "#8b5cf6", "#10b981"];
const PRIORITY_COLORS: [&str; 3] = ["#10b981", "#f59e0b", "#ef4444"];
const COMPLETED_COLOR: &str = "#10b981";
const CREATED_COLOR: &str = "#6366f1";

// TODO: replace with per-day aggregation once tasks record a completion timestamp.
const WEEKLY_COMPLETED_PLACEHOLDER: [usize; 7] = [2, 1, 3, 2, 4, 1, 2];
const WEEKLY_CREATED_PLACEHOLDER: [usize; 7] = [3, 2, 1, 4, 2, 3, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<usize>,
    /// One color per point for doughnut/bar, one color for line series.
    pub background_color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub placeholder: bool,
}

/// Holds the three analytics charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartAdapter {
    status: ChartConfig,
    priority: ChartConfig,
    weekly: ChartConfig,
}

impl ChartAdapter {
    /// Builds all charts from current store aggregates.
    pub fn init<R: TaskRepository>(store: &TaskStore<R>) -> StoreResult<Self> {
        let today = store.clock().today();
        Ok(Self {
            status: status_chart(&store.counts_by_status()?),
            priority: priority_chart(&store.counts_by_priority()?),
            weekly: weekly_chart(today),
        })
    }

    /// Rewrites status and priority data in place. The weekly chart keeps
    /// its placeholder series.
    pub fn refresh<R: TaskRepository>(&mut self, store: &TaskStore<R>) -> StoreResult<()> {
        let status = store.counts_by_status()?;
        let priority = store.counts_by_priority()?;
        self.status.datasets[0].data = status_data(&status);
        self.priority.datasets[0].data = priority_data(&priority);
        debug!(
            "event=charts_refresh module=chart status=ok total={}",
            status.total
        );
        Ok(())
    }

    pub fn status_chart(&self) -> &ChartConfig {
        &self.status
    }

    pub fn priority_chart(&self) -> &ChartConfig {
        &self.priority
    }

    pub fn weekly_chart(&self) -> &ChartConfig {
        &self.weekly
    }

    pub fn charts(&self) -> [&ChartConfig; 3] {
        [&self.status, &self.priority, &self.weekly]
    }
}

fn status_data(counts: &StatusCounts) -> Vec<usize> {
    TaskStatus::ALL.iter().map(|status| counts.get(*status)).collect()
}

fn priority_data(counts: &PriorityCounts) -> Vec<usize> {
    Priority::ALL.iter().map(|priority| counts.get(*priority)).collect()
}

fn colors(values: &[&str]) -> Vec<String> {
    values.iter().map(|color| color.to_string()).collect()
}

fn status_chart(counts: &StatusCounts) -> ChartConfig {
    ChartConfig {
        id: "statusChart".to_string(),
        kind: ChartKind::Doughnut,
        title: "Tasks by Status".to_string(),
        labels: TaskStatus::ALL.iter().map(|s| s.label().to_string()).collect(),
        datasets: vec![Dataset {
            label: None,
            data: status_data(counts),
            background_color: colors(&STATUS_COLORS),
            border_color: None,
        }],
        placeholder: false,
    }
}

fn priority_chart(counts: &PriorityCounts) -> ChartConfig {
    ChartConfig {
        id: "priorityChart".to_string(),
        kind: ChartKind::Bar,
        title: "Tasks by Priority".to_string(),
        labels: Priority::ALL.iter().map(|p| p.label().to_string()).collect(),
        datasets: vec![Dataset {
            label: Some("Tasks".to_string()),
            data: priority_data(counts),
            background_color: colors(&PRIORITY_COLORS),
            border_color: None,
        }],
        placeholder: false,
    }
}

fn weekly_chart(today: NaiveDate) -> ChartConfig {
    let labels = (0..7u64)
        .rev()
        .map(|days_ago| {
            today
                .checked_sub_days(Days::new(days_ago))
                .unwrap_or(today)
                .format("%a")
                .to_string()
        })
        .collect();

    let series = |label: &str, data: [usize; 7], color: &str| Dataset {
        label: Some(label.to_string()),
        data: data.to_vec(),
        background_color: vec![color.to_string()],
        border_color: Some(color.to_string()),
    };

    ChartConfig {
        id: "weeklyChart".to_string(),
        kind: ChartKind::Line,
        title: "Weekly Progress".to_string(),
        labels,
        datasets: vec![
            series("Tasks Completed", WEEKLY_COMPLETED_PLACEHOLDER, COMPLETED_COLOR),
            series("Tasks Created", WEEKLY_CREATED_PLACEHOLDER, CREATED_COLOR),
        ],
        placeholder: true,
    }
}

#[cfg(test)]
mod tests {
    use super::{status_chart, weekly_chart, ChartKind};
    use crate::service::task_store::StatusCounts;
    use chrono::NaiveDate;

    #[test]
    fn weekly_labels_end_today() {
        // 2026-10-17 is a Saturday.
        let chart = weekly_chart(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(
            chart.labels,
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert!(chart.placeholder);
        assert_eq!(chart.kind, ChartKind::Line);
        assert!(chart.datasets.iter().all(|d| d.data.len() == 7));
    }

    #[test]
    fn status_chart_serializes_for_chart_front_end() {
        let counts = StatusCounts {
            todo: 2,
            progress: 1,
            review: 0,
            completed: 3,
            total: 6,
        };
        let json = serde_json::to_value(status_chart(&counts)).unwrap();
        assert_eq!(json["type"], "doughnut");
        assert_eq!(json["datasets"][0]["data"], serde_json::json!([2, 1, 0, 3]));
        assert_eq!(json["datasets"][0]["backgroundColor"][0], "#6366f1");
        assert_eq!(json["labels"][1], "In Progress");
    }
}

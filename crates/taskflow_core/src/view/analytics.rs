//! Analytics view: stat counters plus the three charts.

use super::board::StatsView;
use crate::chart::{ChartAdapter, ChartConfig};
use crate::service::task_store::{PriorityCounts, StatusCounts};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsView {
    pub status_counts: StatusCounts,
    pub priority_counts: PriorityCounts,
    pub charts: Vec<ChartConfig>,
}

pub fn build_analytics(
    status_counts: StatusCounts,
    priority_counts: PriorityCounts,
    charts: &ChartAdapter,
) -> AnalyticsView {
    AnalyticsView {
        status_counts,
        priority_counts,
        charts: charts.charts().into_iter().cloned().collect(),
    }
}

impl Display for AnalyticsView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{}",
            StatsView {
                counts: self.status_counts
            }
        )?;
        for chart in &self.charts {
            writeln!(f)?;
            write!(f, "{chart}")?;
        }
        Ok(())
    }
}

//! Terminal rendering of chart configs as horizontal bars.
//!
//! Doughnut and bar charts draw one scaled bar per label. Line charts print
//! one row per series with a value under each label.

use super::{ChartConfig, ChartKind};
use std::fmt::{Display, Formatter};

const BAR_WIDTH: usize = 30;

impl Display for ChartConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)?;
        if self.placeholder {
            write!(f, " (sample data)")?;
        }
        writeln!(f)?;

        match self.kind {
            ChartKind::Doughnut | ChartKind::Bar => write_bars(f, self),
            ChartKind::Line => write_series(f, self),
        }
    }
}

fn write_bars(f: &mut Formatter<'_>, chart: &ChartConfig) -> std::fmt::Result {
    let Some(dataset) = chart.datasets.first() else {
        return Ok(());
    };
    let label_width = chart.labels.iter().map(String::len).max().unwrap_or(0);
    let max = dataset.data.iter().copied().max().unwrap_or(0);

    for (label, value) in chart.labels.iter().zip(&dataset.data) {
        let len = if max == 0 { 0 } else { value * BAR_WIDTH / max };
        writeln!(
            f,
            "  {label:<label_width$}  {:<BAR_WIDTH$}  {value}",
            "#".repeat(len)
        )?;
    }
    Ok(())
}

fn write_series(f: &mut Formatter<'_>, chart: &ChartConfig) -> std::fmt::Result {
    let label_width = chart
        .datasets
        .iter()
        .filter_map(|dataset| dataset.label.as_ref().map(String::len))
        .max()
        .unwrap_or(0);

    write!(f, "  {:<label_width$}", "")?;
    for label in &chart.labels {
        write!(f, " {label:>4}")?;
    }
    writeln!(f)?;

    for dataset in &chart.datasets {
        let name = dataset.label.as_deref().unwrap_or("");
        write!(f, "  {name:<label_width$}")?;
        for value in &dataset.data {
            write!(f, " {value:>4}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::chart::{ChartConfig, ChartKind, Dataset};

    #[test]
    fn bars_scale_to_largest_value() {
        let chart = ChartConfig {
            id: "p".to_string(),
            kind: ChartKind::Bar,
            title: "Tasks by Priority".to_string(),
            labels: vec!["Low".to_string(), "High".to_string()],
            datasets: vec![Dataset {
                label: None,
                data: vec![1, 2],
                background_color: Vec::new(),
                border_color: None,
            }],
            placeholder: false,
        };

        let text = chart.to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Tasks by Priority");
        assert_eq!(lines[1].matches('#').count(), 15);
        assert_eq!(lines[2].matches('#').count(), 30);
    }

    #[test]
    fn line_chart_prints_one_row_per_series() {
        let chart = ChartConfig {
            id: "w".to_string(),
            kind: ChartKind::Line,
            title: "Weekly Progress".to_string(),
            labels: vec!["Mon".to_string(), "Tue".to_string()],
            datasets: vec![Dataset {
                label: Some("Tasks Created".to_string()),
                data: vec![3, 2],
                background_color: Vec::new(),
                border_color: None,
            }],
            placeholder: true,
        };

        let text = chart.to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Weekly Progress (sample data)");
        assert!(lines[1].ends_with(" Mon  Tue"));
        assert!(lines[2].starts_with("  Tasks Created"));
        assert!(lines[2].ends_with("    3    2"));
    }
}

//! Headless presentation layer: every element exists, nothing is drawn
//! until the command finishes and prints the dashboard's projections.

use std::fmt::Write as _;

use fund_dashboard_core::errors::CoreError;
use fund_dashboard_core::models::chart::RenderedChart;
use fund_dashboard_core::models::notification::Notification;
use fund_dashboard_core::models::view::{
    ControlsView, DataInfoPanel, StatCardBody, StatPanel,
};
use fund_dashboard_core::ui::{ChartWidget, DashboardView, UiSurface};

pub struct TerminalSurface;

impl UiSurface for TerminalSurface {
    fn has_element(&self, _dom_id: &str) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct TerminalChart;

impl ChartWidget for TerminalChart {
    fn replace(&mut self, chart: &RenderedChart) {
        tracing::debug!(labels = chart.labels.len(), series = chart.series.len(), "chart replaced");
    }

    fn export_png(&self) -> Result<Vec<u8>, CoreError> {
        Err(CoreError::Unsupported(
            "PNG export needs a graphical chart widget".to_string(),
        ))
    }
}

#[derive(Debug, Default)]
pub struct TerminalView;

impl DashboardView for TerminalView {
    fn show_statistics(&mut self, panel: &StatPanel) {
        tracing::debug!(?panel, "statistics updated");
    }

    fn show_data_info(&mut self, panel: &DataInfoPanel) {
        tracing::debug!(sections = panel.sections.len(), "data info updated");
    }

    fn show_controls(&mut self, controls: &ControlsView) {
        tracing::debug!(
            data_type = %controls.data_type,
            chart_type = %controls.chart_type,
            start = ?controls.start_date,
            end = ?controls.end_date,
            "controls updated"
        );
    }
}

// ── Text rendering ──────────────────────────────────────────────────

pub fn format_notification(notification: &Notification) -> String {
    format!("[{}] {}", notification.kind, notification.message)
}

pub fn format_data_info(panel: &DataInfoPanel) -> String {
    if panel.is_empty() {
        return "No data loaded.\n".to_string();
    }
    let mut out = String::new();
    for section in &panel.sections {
        let _ = writeln!(out, "{}", section.title);
        let _ = writeln!(out, "  {} ({})", section.records, section.date_range);
        for row in &section.funds {
            match &row.span {
                Some(span) => {
                    let _ = writeln!(out, "  {:<6} {:>7}  {span}", row.fund, row.coverage);
                }
                None => {
                    let _ = writeln!(out, "  {:<6} {:>7}", row.fund, row.coverage);
                }
            }
        }
    }
    out
}

/// One line per series: label, observation count and last value.
pub fn format_chart(chart: &RenderedChart) -> String {
    let mut out = String::new();
    let (first, last) = (chart.labels.first(), chart.labels.last());
    if let (Some(first), Some(last)) = (first, last) {
        let _ = writeln!(out, "{} | {first} to {last} | {} points", chart.value_axis_title, chart.labels.len());
    } else {
        let _ = writeln!(out, "{} | no observations", chart.value_axis_title);
    }
    for series in &chart.series {
        let observed = series.values.iter().flatten().count();
        let latest = series.values.iter().rev().flatten().next();
        let latest = latest.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        let _ = writeln!(out, "  {:<7} {observed:>5} values  last {latest}", series.label);
    }
    out
}

pub fn format_statistics(panel: &StatPanel) -> String {
    let mut out = String::new();
    match panel {
        StatPanel::Empty => {}
        StatPanel::Error(message) => {
            let _ = writeln!(out, "{message}");
        }
        StatPanel::NoData => {
            let _ = writeln!(out, "No data available for selected filters");
        }
        StatPanel::Cards(cards) => {
            for card in cards {
                match &card.body {
                    StatCardBody::NoData { coverage } => {
                        let _ = writeln!(out, "{:<7} No Data  {coverage}", card.title);
                    }
                    StatCardBody::Values {
                        current,
                        change,
                        coverage,
                        range,
                        ..
                    } => {
                        let _ = write!(out, "{:<7} {current:>9} {change:>9}  {coverage}", card.title);
                        if let Some(range) = range {
                            let _ = write!(out, "  range {range}");
                        }
                        out.push('\n');
                    }
                }
            }
        }
    }
    out
}

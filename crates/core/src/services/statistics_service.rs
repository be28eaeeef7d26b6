use crate::errors::CoreError;
use crate::models::filter::{DataType, FilterQuery};
use crate::models::fund::SelectedFunds;
use crate::models::statistics::{FundStatistics, StatisticsEnvelope};
use crate::models::view::{ChangeDirection, StatCard, StatCardBody, StatPanel};
use crate::services::request_generation::{RequestGeneration, Ticket};

/// Placeholder text when the statistics request fails without a message.
pub const STATISTICS_ERROR: &str = "Error loading statistics";

/// A statistics request waiting for its response.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingStatistics {
    pub ticket: Ticket,
    pub query: FilterQuery,
    pub funds: SelectedFunds,
}

/// Requests per-fund summaries for the active filter and renders them as
/// stat cards.
#[derive(Debug, Default)]
pub struct StatisticsService {
    generation: RequestGeneration,
}

impl StatisticsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare(&mut self, query: FilterQuery, funds: SelectedFunds) -> PendingStatistics {
        PendingStatistics {
            ticket: self.generation.issue(),
            query,
            funds,
        }
    }

    /// Build the panel for a settled request, or `None` if it is stale.
    #[must_use]
    pub fn complete(
        &self,
        pending: &PendingStatistics,
        result: &Result<StatisticsEnvelope, CoreError>,
    ) -> Option<StatPanel> {
        if !self.generation.is_current(pending.ticket) {
            tracing::warn!(ticket = ?pending.ticket, "discarding stale statistics response");
            return None;
        }
        Some(render_statistics(result, &pending.funds, pending.query.data_type))
    }
}

/// Map a statistics result to the stat panel.
///
/// - failure or `success: false` → one error placeholder
/// - empty mapping → one "no data" placeholder
/// - otherwise one card per selected fund present in the mapping
#[must_use]
pub fn render_statistics(
    result: &Result<StatisticsEnvelope, CoreError>,
    funds: &SelectedFunds,
    data_type: DataType,
) -> StatPanel {
    let envelope = match result {
        Ok(envelope) if envelope.success => envelope,
        Ok(envelope) => {
            return StatPanel::Error(
                envelope
                    .message
                    .clone()
                    .unwrap_or_else(|| STATISTICS_ERROR.to_string()),
            )
        }
        Err(_) => return StatPanel::Error(STATISTICS_ERROR.to_string()),
    };

    if envelope.statistics.is_empty() {
        return StatPanel::NoData;
    }

    let cards = funds
        .iter()
        .filter_map(|fund| {
            envelope.statistics.get(&fund).map(|stats| StatCard {
                fund,
                title: fund.display_name().to_string(),
                body: render_card_body(stats, data_type),
            })
        })
        .collect();

    StatPanel::Cards(cards)
}

/// Body of a single card. Branches on whether `current` is present.
#[must_use]
pub fn render_card_body(stats: &FundStatistics, data_type: DataType) -> StatCardBody {
    let Some(current) = stats.current else {
        return StatCardBody::NoData {
            coverage: format!("Coverage: {:.1}%", stats.data_coverage_percent),
        };
    };

    // Display-only default; `stats.change` itself stays `None`.
    let change = stats.change.unwrap_or(0.0);
    let direction = if change > 0.0 {
        ChangeDirection::Positive
    } else if change < 0.0 {
        ChangeDirection::Negative
    } else {
        ChangeDirection::Neutral
    };

    let range = stats.min.map(|min| {
        let max = stats.max.map_or_else(|| "-".to_string(), |m| format_value(m, data_type));
        format!("{} – {max}", format_value(min, data_type))
    });

    StatCardBody::Values {
        current: format_value(current, data_type),
        change: format_change(change, data_type),
        direction,
        coverage: format!(
            "{}/{} periods ({:.1}%)",
            stats.count, stats.total_periods, stats.data_coverage_percent
        ),
        range,
    }
}

/// Currency for prices, percentage for returns.
#[must_use]
pub fn format_value(value: f64, data_type: DataType) -> String {
    match data_type {
        DataType::Prices => {
            if value < 0.0 {
                format!("-${:.2}", value.abs())
            } else {
                format!("${value:.2}")
            }
        }
        DataType::Returns => format!("{value:.2}%"),
    }
}

/// Signed change, with a percentage suffix for returns.
#[must_use]
pub fn format_change(change: f64, data_type: DataType) -> String {
    let suffix = match data_type {
        DataType::Prices => "",
        DataType::Returns => "%",
    };
    if change >= 0.0 {
        format!("+{change:.2}{suffix}")
    } else {
        format!("{change:.2}{suffix}")
    }
}

use crate::errors::CoreError;
use crate::models::chart::{ChartEnvelope, ChartResponse, RenderedChart, RenderedSeries};
use crate::models::filter::{ChartType, DataType, FilterQuery};
use crate::models::state::AppState;
use crate::services::request_generation::{RequestGeneration, Ticket};

/// Radius of every data point.
pub const POINT_RADIUS: f32 = 1.0;

/// Radius of a hovered data point.
pub const POINT_HOVER_RADIUS: f32 = 4.0;

/// Alpha suffix appended to the line colour for the area fill.
const FILL_ALPHA_SUFFIX: &str = "20";

/// A chart request that passed the client-side guards and is waiting for
/// its response.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChart {
    pub ticket: Ticket,
    pub query: FilterQuery,
    pub chart_type: ChartType,
}

/// What to do with a settled chart response.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartCompletion {
    /// Replace the chart with this projection.
    Render(RenderedChart),
    /// A newer chart request was issued after this one; drop it.
    Stale,
}

/// Turns the active filter into chart requests and chart responses into
/// widget-ready projections.
///
/// The service computes every value; this side only decorates series with
/// presentation attributes.
#[derive(Debug, Default)]
pub struct ChartService {
    generation: RequestGeneration,
}

impl ChartService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the guards and issue a ticket for the active filter.
    ///
    /// Fails with `DatasetNotLoaded` when the selected data type has no
    /// dataset (the service would reject the request) and with
    /// `ValidationError` for an inverted date range.
    pub fn prepare(&mut self, state: &AppState) -> Result<PendingChart, CoreError> {
        if !state.active_dataset_loaded() {
            return Err(CoreError::DatasetNotLoaded(state.data_type()));
        }
        let query = state.query();
        query.validate()?;

        Ok(PendingChart {
            ticket: self.generation.issue(),
            query,
            chart_type: state.chart_type(),
        })
    }

    /// Whether `pending` still holds the newest chart ticket.
    #[must_use]
    pub fn is_current(&self, pending: &PendingChart) -> bool {
        self.generation.is_current(pending.ticket)
    }

    /// Interpret the envelope for `pending`.
    ///
    /// `success: false` becomes `Rejected`; a payload violating the
    /// label/value length invariant becomes `InvalidResponse`. Neither
    /// touches the chart currently on screen.
    pub fn complete(
        &self,
        pending: &PendingChart,
        envelope: ChartEnvelope,
    ) -> Result<ChartCompletion, CoreError> {
        if !self.is_current(pending) {
            tracing::warn!(ticket = ?pending.ticket, "discarding stale chart response");
            return Ok(ChartCompletion::Stale);
        }

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "Failed to load chart data".to_string());
            return Err(CoreError::Rejected(message));
        }

        let response = envelope
            .data
            .ok_or_else(|| CoreError::InvalidResponse("Chart response has no data".to_string()))?;
        response.validate()?;

        Ok(ChartCompletion::Render(render_chart(
            &response,
            pending.chart_type,
            pending.query.data_type,
        )))
    }
}

/// Value-axis title for a data type.
#[must_use]
pub fn value_axis_title(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Prices => "Share Price ($)",
        DataType::Returns => "Monthly Return (%)",
    }
}

/// Decorate a service response for the chart widget.
///
/// Pure: labels and values pass through untouched, and `chart_type` only
/// decides whether series are filled.
#[must_use]
pub fn render_chart(response: &ChartResponse, chart_type: ChartType, data_type: DataType) -> RenderedChart {
    let fill = chart_type == ChartType::Area;
    let series = response
        .datasets
        .iter()
        .map(|s| RenderedSeries {
            fund: s.fund,
            label: s.fund.display_name().to_string(),
            values: s.values.clone(),
            border_color: s.border_color.clone(),
            background_color: format!("{}{FILL_ALPHA_SUFFIX}", s.border_color),
            point_background_color: s.border_color.clone(),
            fill,
            point_radius: POINT_RADIUS,
            point_hover_radius: POINT_HOVER_RADIUS,
            span_gaps: false,
        })
        .collect();

    RenderedChart {
        labels: response.labels.clone(),
        series,
        value_axis_title: value_axis_title(data_type).to_string(),
    }
}

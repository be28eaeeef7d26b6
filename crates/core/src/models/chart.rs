use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fund::FundId;
use crate::errors::CoreError;

/// Envelope returned by the chart-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ChartResponse>,
    #[serde(default)]
    pub record_count: Option<u64>,
}

/// Chart data computed by the service: one label per observation date and
/// one value sequence per fund.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartResponse {
    pub labels: Vec<NaiveDate>,
    pub datasets: Vec<ChartSeries>,
}

/// A single fund's series as sent by the service. `None` marks a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(rename = "label")]
    pub fund: FundId,
    #[serde(rename = "borderColor")]
    pub border_color: String,
    #[serde(rename = "data")]
    pub values: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Every dataset must have exactly one value per label.
    pub fn validate(&self) -> Result<(), CoreError> {
        let expected = self.labels.len();
        for series in &self.datasets {
            if series.values.len() != expected {
                return Err(CoreError::InvalidResponse(format!(
                    "Series {} has {} values for {} labels",
                    series.fund,
                    series.values.len(),
                    expected
                )));
            }
        }
        Ok(())
    }
}

/// A series decorated with the fixed presentation attributes the chart
/// widget needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSeries {
    pub fund: FundId,
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub border_color: String,
    pub background_color: String,
    pub point_background_color: String,
    pub fill: bool,
    pub point_radius: f32,
    pub point_hover_radius: f32,
    /// Gaps (`None`) break the line instead of being interpolated.
    pub span_gaps: bool,
}

/// The full projection pushed into the chart widget. Replaces any previous
/// projection wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderedChart {
    pub labels: Vec<NaiveDate>,
    pub series: Vec<RenderedSeries>,
    pub value_axis_title: String,
}

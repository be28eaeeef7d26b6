use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::fund::FundId;

/// Envelope returned by the statistics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub statistics: StatisticsResponse,
}

/// Per-fund summary values as computed by the service.
pub type StatisticsResponse = HashMap<FundId, FundStatistics>;

/// Summary of one fund over the active filter.
///
/// `current`, `change`, `min` and `max` are `None` when the fund has no
/// observation in range. They are never defaulted to zero here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FundStatistics {
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub previous: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub std: Option<f64>,
    /// Periods with an observation.
    #[serde(default)]
    pub count: u64,
    /// Periods in the filtered range.
    #[serde(default)]
    pub total_periods: u64,
    #[serde(default)]
    pub missing_periods: Option<u64>,
    /// `count / total_periods` as a percentage, rounded by the service.
    #[serde(rename = "data_coverage", default)]
    pub data_coverage_percent: f64,
}

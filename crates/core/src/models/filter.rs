use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fund::{FundId, SelectedFunds};
use crate::errors::CoreError;

/// Which uploaded dataset a chart or statistics request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Prices,
    Returns,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Prices => write!(f, "prices"),
            DataType::Returns => write!(f, "returns"),
        }
    }
}

impl std::str::FromStr for DataType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prices" => Ok(DataType::Prices),
            "returns" => Ok(DataType::Returns),
            other => Err(CoreError::ValidationError(format!(
                "Unknown data type '{other}': expected 'prices' or 'returns'"
            ))),
        }
    }
}

/// Chart style. Only affects the fill attribute of rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Area,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartType::Line => write!(f, "line"),
            ChartType::Area => write!(f, "area"),
        }
    }
}

impl std::str::FromStr for ChartType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            "area" => Ok(ChartType::Area),
            other => Err(CoreError::ValidationError(format!(
                "Unknown chart type '{other}': expected 'line' or 'area'"
            ))),
        }
    }
}

/// Inclusive min/max of a date input, taken from a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min && date <= self.max
    }
}

/// Request body shared by the chart-data, statistics and export endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub data_type: DataType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub funds: Vec<FundId>,
}

impl FilterQuery {
    /// Reject requests the service would misread: no funds (the service
    /// treats an empty list as "all funds") or an inverted date range.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.funds.is_empty() {
            return Err(CoreError::ValidationError(
                "Select at least one fund".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(CoreError::ValidationError(format!(
                    "Start date ({start}) must not be after end date ({end})"
                )));
            }
        }
        Ok(())
    }
}

/// The values bound to the data-type, date and chart-type inputs.
///
/// Date values are always inside `bounds` once bounds are known; an empty
/// control (`None`) is filled with the bound on the next refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterControls {
    pub data_type: DataType,
    pub chart_type: ChartType,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    bounds: Option<DateBounds>,
}

impl FilterControls {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    #[must_use]
    pub fn bounds(&self) -> Option<DateBounds> {
        self.bounds
    }

    /// Install new min/max bounds for the date inputs.
    ///
    /// In-range values are kept. Empty or out-of-range values receive the
    /// range ends. `None` leaves the inputs unbounded and untouched.
    pub fn apply_bounds(&mut self, bounds: Option<DateBounds>) {
        self.bounds = bounds;
        let Some(b) = bounds else {
            return;
        };
        self.start_date = Some(self.start_date.filter(|d| b.contains(*d)).unwrap_or(b.min));
        self.end_date = Some(self.end_date.filter(|d| b.contains(*d)).unwrap_or(b.max));
    }

    /// Set the start date, clamped to the current bounds. Returns the stored value.
    pub fn set_start_date(&mut self, date: NaiveDate) -> NaiveDate {
        let stored = self.bounds.map_or(date, |b| b.clamp(date));
        self.start_date = Some(stored);
        stored
    }

    /// Set the end date, clamped to the current bounds. Returns the stored value.
    pub fn set_end_date(&mut self, date: NaiveDate) -> NaiveDate {
        let stored = self.bounds.map_or(date, |b| b.clamp(date));
        self.end_date = Some(stored);
        stored
    }

    /// Restore data type and chart type defaults and empty the date inputs
    /// so the next bounds refresh repopulates the full range.
    pub fn reset(&mut self) {
        self.data_type = DataType::Prices;
        self.chart_type = ChartType::Line;
        self.start_date = None;
        self.end_date = None;
    }

    /// Build the request body for the current controls and fund selection.
    #[must_use]
    pub fn query(&self, funds: &SelectedFunds) -> FilterQuery {
        FilterQuery {
            data_type: self.data_type,
            start_date: self.start_date,
            end_date: self.end_date,
            funds: funds.iter().collect(),
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::filter::{DataType, DateBounds};
use super::fund::FundId;

/// Which datasets have been successfully loaded this session.
///
/// Flags only ever go from `false` to `true`; there is no unload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetAvailability {
    prices_loaded: bool,
    returns_loaded: bool,
}

impl DatasetAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_loaded(&self, data_type: DataType) -> bool {
        match data_type {
            DataType::Prices => self.prices_loaded,
            DataType::Returns => self.returns_loaded,
        }
    }

    /// Record a successful load. Returns `true` if the flag was newly set.
    pub fn mark_loaded(&mut self, data_type: DataType) -> bool {
        let flag = match data_type {
            DataType::Prices => &mut self.prices_loaded,
            DataType::Returns => &mut self.returns_loaded,
        };
        let was = *flag;
        *flag = true;
        !was
    }

    #[must_use]
    pub fn any_loaded(&self) -> bool {
        self.prices_loaded || self.returns_loaded
    }
}

/// Inclusive date range of a dataset, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<DateRange> for DateBounds {
    fn from(r: DateRange) -> Self {
        DateBounds::new(r.start, r.end)
    }
}

/// Per-fund coverage within one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundAvailability {
    #[serde(default)]
    pub valid_records: u64,
    #[serde(default)]
    pub total_records: u64,
    pub coverage_percentage: f64,
    #[serde(default)]
    pub first_data_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_data_date: Option<NaiveDate>,
}

/// Summary of one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub record_count: u64,
    pub date_range: DateRange,
    #[serde(default)]
    pub fund_availability: HashMap<FundId, FundAvailability>,
}

/// Response of the data-info endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataInfo {
    #[serde(default)]
    pub prices_loaded: bool,
    #[serde(default)]
    pub returns_loaded: bool,
    #[serde(default)]
    pub available_funds: Vec<FundId>,
    #[serde(default)]
    pub prices_info: Option<DatasetInfo>,
    #[serde(default)]
    pub returns_info: Option<DatasetInfo>,
}

impl DataInfo {
    #[must_use]
    pub fn dataset(&self, data_type: DataType) -> Option<&DatasetInfo> {
        match data_type {
            DataType::Prices => self.prices_info.as_ref(),
            DataType::Returns => self.returns_info.as_ref(),
        }
    }

    /// Date-input bounds for `data_type`, if that dataset is loaded.
    #[must_use]
    pub fn bounds_for(&self, data_type: DataType) -> Option<DateBounds> {
        self.dataset(data_type).map(|d| d.date_range.into())
    }
}

/// Missing-value summary for one fund column of an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NanStatistics {
    pub total: u64,
    pub valid: u64,
    pub missing: u64,
    pub missing_percentage: f64,
    #[serde(default)]
    pub first_valid_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_valid_date: Option<NaiveDate>,
}

/// Response of the upload endpoints.
///
/// `success` is independent of the HTTP status: a parse failure in the CSV
/// comes back as `success: false` with a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub nan_statistics: HashMap<FundId, NanStatistics>,
}

/// Response of the load-sample-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDataResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub prices_result: Option<UploadResponse>,
    #[serde(default)]
    pub returns_result: Option<UploadResponse>,
}

impl SampleDataResponse {
    /// Whether the nested result for `data_type` loaded. A missing nested
    /// result counts as loaded when the outer call succeeded.
    #[must_use]
    pub fn loaded(&self, data_type: DataType) -> bool {
        let nested = match data_type {
            DataType::Prices => self.prices_result.as_ref(),
            DataType::Returns => self.returns_result.as_ref(),
        };
        self.success && nested.map_or(true, |r| r.success)
    }
}

/// Response of the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::filter::{ChartType, DataType, DateBounds};
use super::fund::FundId;

/// Direction of a fund's change over the range, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDirection {
    Positive,
    Negative,
    Neutral,
}

/// Body of a summary card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatCardBody {
    /// The fund has no observation in range.
    NoData { coverage: String },
    Values {
        current: String,
        change: String,
        direction: ChangeDirection,
        coverage: String,
        /// Only present when the service reported a minimum.
        range: Option<String>,
    },
}

/// One summary card in the statistics grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub fund: FundId,
    pub title: String,
    pub body: StatCardBody,
}

/// Content of the statistics grid. Rebuilt from scratch on every update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum StatPanel {
    /// Nothing requested yet.
    #[default]
    Empty,
    /// Single placeholder shown when the request failed.
    Error(String),
    /// Single placeholder shown when the service returned no entries.
    NoData,
    Cards(Vec<StatCard>),
}

/// One fund row of a dataset section in the data-info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundCoverageRow {
    pub fund: FundId,
    pub coverage: String,
    /// "first – last" observed dates, when the service reports them.
    pub span: Option<String>,
}

/// Summary of one loaded dataset in the data-info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSection {
    pub data_type: DataType,
    pub title: String,
    pub records: String,
    pub date_range: String,
    pub funds: Vec<FundCoverageRow>,
}

/// Content of the data-info panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataInfoPanel {
    pub sections: Vec<DatasetSection>,
}

impl DataInfoPanel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Projection of the filter inputs and fund checkboxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsView {
    pub data_type: DataType,
    pub chart_type: ChartType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub bounds: Option<DateBounds>,
    /// One entry per fund in canonical order: (fund, checked).
    pub checkboxes: Vec<(FundId, bool)>,
}

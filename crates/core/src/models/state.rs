use chrono::NaiveDate;

use super::dataset::{DataInfo, DatasetAvailability};
use super::filter::{ChartType, DataType, FilterControls, FilterQuery};
use super::fund::{FundId, SelectedFunds};
use super::view::ControlsView;

/// The controller's single owned record of what is loaded and selected.
///
/// Every mutation is synchronous; renderers read it through the accessors
/// and never hold on to it across a request.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    availability: DatasetAvailability,
    selected_funds: SelectedFunds,
    controls: FilterControls,
    data_info: Option<DataInfo>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn availability(&self) -> DatasetAvailability {
        self.availability
    }

    #[must_use]
    pub fn selected_funds(&self) -> &SelectedFunds {
        &self.selected_funds
    }

    #[must_use]
    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    #[must_use]
    pub fn data_info(&self) -> Option<&DataInfo> {
        self.data_info.as_ref()
    }

    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.controls.data_type
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.controls.chart_type
    }

    /// Whether the dataset behind the active data type has been loaded.
    #[must_use]
    pub fn active_dataset_loaded(&self) -> bool {
        self.availability.is_loaded(self.controls.data_type)
    }

    /// Request body for the active filter.
    #[must_use]
    pub fn query(&self) -> FilterQuery {
        self.controls.query(&self.selected_funds)
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub fn mark_loaded(&mut self, data_type: DataType) -> bool {
        self.availability.mark_loaded(data_type)
    }

    /// Mirror a fund checkbox. Returns `true` if membership changed.
    pub fn set_fund_selected(&mut self, fund: FundId, checked: bool) -> bool {
        self.selected_funds.set(fund, checked)
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.controls.chart_type = chart_type;
    }

    /// Switch dataset and re-derive the date bounds from the last data info.
    pub fn set_data_type(&mut self, data_type: DataType) {
        self.controls.data_type = data_type;
        self.refresh_bounds();
    }

    pub fn set_start_date(&mut self, date: NaiveDate) -> NaiveDate {
        self.controls.set_start_date(date)
    }

    pub fn set_end_date(&mut self, date: NaiveDate) -> NaiveDate {
        self.controls.set_end_date(date)
    }

    /// Store a fresh data-info snapshot and clamp the date inputs to it.
    pub fn apply_data_info(&mut self, info: DataInfo) {
        self.data_info = Some(info);
        self.refresh_bounds();
    }

    /// Restore the full fund universe and the default data/chart types.
    /// Date inputs are emptied until the next data-info refresh.
    pub fn reset_filters(&mut self) {
        self.selected_funds.reset();
        self.controls.reset();
    }

    /// Projection for the filter controls.
    #[must_use]
    pub fn controls_view(&self) -> ControlsView {
        ControlsView {
            data_type: self.controls.data_type,
            chart_type: self.controls.chart_type,
            start_date: self.controls.start_date(),
            end_date: self.controls.end_date(),
            bounds: self.controls.bounds(),
            checkboxes: FundId::ALL
                .iter()
                .map(|f| (*f, self.selected_funds.contains(*f)))
                .collect(),
        }
    }

    fn refresh_bounds(&mut self) {
        let bounds = self
            .data_info
            .as_ref()
            .and_then(|info| info.bounds_for(self.controls.data_type));
        self.controls.apply_bounds(bounds);
    }
}

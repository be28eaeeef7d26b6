//! Seams to the presentation layer.
//!
//! The core never touches markup or pixels. It checks once that the
//! expected elements exist, then pushes fully-rebuilt projections through
//! [`ChartWidget`] and [`DashboardView`].

use crate::errors::CoreError;
use crate::models::chart::RenderedChart;
use crate::models::view::{ControlsView, DataInfoPanel, StatPanel};

/// Elements the controller expects the presentation layer to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    DataType,
    StartDate,
    EndDate,
    ChartType,
    FundSelection,
    ChartCanvas,
    DataInfoPanel,
    StatisticsGrid,
    PricesFileInput,
    ReturnsFileInput,
}

impl ElementId {
    pub const REQUIRED: [ElementId; 10] = [
        ElementId::DataType,
        ElementId::StartDate,
        ElementId::EndDate,
        ElementId::ChartType,
        ElementId::FundSelection,
        ElementId::ChartCanvas,
        ElementId::DataInfoPanel,
        ElementId::StatisticsGrid,
        ElementId::PricesFileInput,
        ElementId::ReturnsFileInput,
    ];

    /// Identifier of the element in the presentation markup.
    #[must_use]
    pub fn dom_id(&self) -> &'static str {
        match self {
            ElementId::DataType => "dataType",
            ElementId::StartDate => "startDate",
            ElementId::EndDate => "endDate",
            ElementId::ChartType => "chartType",
            ElementId::FundSelection => "fundCheckboxes",
            ElementId::ChartCanvas => "mainChart",
            ElementId::DataInfoPanel => "dataInfo",
            ElementId::StatisticsGrid => "statsGrid",
            ElementId::PricesFileInput => "pricesFile",
            ElementId::ReturnsFileInput => "returnsFile",
        }
    }
}

/// Queryable element tree of the presentation layer.
pub trait UiSurface {
    fn has_element(&self, dom_id: &str) -> bool;
}

/// Fail with `MissingElement` for the first required element not present.
pub fn verify_surface(surface: &dyn UiSurface) -> Result<(), CoreError> {
    for element in ElementId::REQUIRED {
        if !surface.has_element(element.dom_id()) {
            return Err(CoreError::MissingElement(element.dom_id().to_string()));
        }
    }
    Ok(())
}

/// The charting library, seen from the controller.
pub trait ChartWidget: Send {
    /// Replace labels, series and axis title wholesale.
    fn replace(&mut self, chart: &RenderedChart);

    /// Rasterize the current chart as PNG bytes.
    fn export_png(&self) -> Result<Vec<u8>, CoreError>;
}

/// Everything else the controller renders into.
pub trait DashboardView: Send {
    fn show_statistics(&mut self, panel: &StatPanel);

    fn show_data_info(&mut self, panel: &DataInfoPanel);

    fn show_controls(&mut self, controls: &ControlsView);
}

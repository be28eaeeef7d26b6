use crate::models::dataset::{DataInfo, DatasetInfo};
use crate::models::filter::DataType;
use crate::models::fund::FundId;
use crate::models::view::{DataInfoPanel, DatasetSection, FundCoverageRow};

/// Build the data-info panel: one section per loaded dataset, one row per
/// fund the service reported coverage for.
#[must_use]
pub fn render_data_info(info: &DataInfo) -> DataInfoPanel {
    let sections = [DataType::Prices, DataType::Returns]
        .into_iter()
        .filter_map(|dt| info.dataset(dt).map(|dataset| render_section(dt, dataset)))
        .collect();
    DataInfoPanel { sections }
}

fn render_section(data_type: DataType, dataset: &DatasetInfo) -> DatasetSection {
    let title = match data_type {
        DataType::Prices => "Prices Data",
        DataType::Returns => "Returns Data",
    };

    let funds = FundId::ALL
        .iter()
        .filter_map(|fund| {
            dataset.fund_availability.get(fund).map(|a| FundCoverageRow {
                fund: *fund,
                coverage: format!("{:.1}%", a.coverage_percentage),
                span: match (a.first_data_date, a.last_data_date) {
                    (Some(first), Some(last)) => Some(format!("{first} – {last}")),
                    _ => None,
                },
            })
        })
        .collect();

    DatasetSection {
        data_type,
        title: title.to_string(),
        records: format!("{} records", dataset.record_count),
        date_range: format!("{} to {}", dataset.date_range.start, dataset.date_range.end),
        funds,
    }
}

use chrono::NaiveDate;

use crate::models::filter::DataType;

/// File name for a filtered-data export, e.g. `returns_export_2024-03-05.csv`.
#[must_use]
pub fn csv_export_filename(data_type: DataType, date: NaiveDate) -> String {
    format!("{data_type}_export_{}.csv", date.format("%Y-%m-%d"))
}

/// File name for a chart image export, e.g. `prices_chart_2024-03-05.png`.
#[must_use]
pub fn chart_export_filename(data_type: DataType, date: NaiveDate) -> String {
    format!("{data_type}_chart_{}.png", date.format("%Y-%m-%d"))
}

/// Write export bytes into `dir` under `filename` (native only, not WASM).
/// Returns the full path written.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_export(
    dir: &std::path::Path,
    filename: &str,
    bytes: &[u8],
) -> Result<std::path::PathBuf, crate::errors::CoreError> {
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "export saved");
    Ok(path)
}

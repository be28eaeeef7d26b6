use crate::client::traits::FileAttachment;
use crate::errors::CoreError;
use crate::models::dataset::{SampleDataResponse, UploadResponse};
use crate::models::filter::DataType;
use crate::models::state::AppState;

/// Pick the file to upload from a capture path (drop zone or picker).
///
/// An empty list is a silent no-op (`None`); otherwise the first file wins.
#[must_use]
pub fn accept_files(files: Vec<FileAttachment>) -> Option<FileAttachment> {
    let count = files.len();
    let first = files.into_iter().next();
    if count > 1 {
        tracing::debug!(count, "multiple files captured; uploading the first");
    }
    first
}

/// Record a settled upload in the state.
///
/// Sets the availability flag on `success: true`; a rejection leaves the
/// state untouched and comes back as `Rejected` with the service message.
pub fn apply_upload(
    state: &mut AppState,
    data_type: DataType,
    response: &UploadResponse,
) -> Result<String, CoreError> {
    if !response.success {
        tracing::warn!(%data_type, message = %response.message, "upload rejected");
        return Err(CoreError::Rejected(rejection_message(&response.message, data_type)));
    }
    state.mark_loaded(data_type);
    tracing::info!(%data_type, message = %response.message, "dataset loaded");
    Ok(success_message(&response.message, data_type))
}

/// Record a settled sample-data load. Each flag is set only if its nested
/// result loaded.
pub fn apply_sample(state: &mut AppState, response: &SampleDataResponse) -> Result<String, CoreError> {
    if !response.success {
        tracing::warn!(message = %response.message, "sample data rejected");
        return Err(CoreError::Rejected(if response.message.is_empty() {
            "Failed to load sample data".to_string()
        } else {
            response.message.clone()
        }));
    }

    for data_type in [DataType::Prices, DataType::Returns] {
        if response.loaded(data_type) {
            state.mark_loaded(data_type);
        } else {
            tracing::warn!(%data_type, "sample dataset did not load");
        }
    }

    Ok(if response.message.is_empty() {
        "Sample data loaded successfully".to_string()
    } else {
        response.message.clone()
    })
}

fn success_message(message: &str, data_type: DataType) -> String {
    if message.is_empty() {
        format!("{} data uploaded successfully", capitalized(data_type))
    } else {
        message.to_string()
    }
}

fn rejection_message(message: &str, data_type: DataType) -> String {
    if message.is_empty() {
        format!("Failed to upload {data_type} data")
    } else {
        message.to_string()
    }
}

fn capitalized(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Prices => "Prices",
        DataType::Returns => "Returns",
    }
}

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::CoreError;

/// Multipart field name the upload endpoints read the file from.
pub const UPLOAD_FIELD: &str = "file";

/// Fixed sub-routes of the analytics service, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UploadPrices,
    UploadReturns,
    LoadSampleData,
    DataInfo,
    ChartData,
    Statistics,
    Export,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Endpoint {
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::UploadPrices => "upload/prices",
            Endpoint::UploadReturns => "upload/returns",
            Endpoint::LoadSampleData => "load-sample-data",
            Endpoint::DataInfo => "data-info",
            Endpoint::ChartData => "chart-data",
            Endpoint::Statistics => "statistics",
            Endpoint::Export => "export",
            Endpoint::Health => "health",
        }
    }

    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Endpoint::DataInfo | Endpoint::Health => Method::Get,
            _ => Method::Post,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A user-selected file, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> Result<Self, CoreError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self { name, bytes })
    }
}

/// Request body variants: nothing, a file attachment, or a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    File(FileAttachment),
    Json(serde_json::Value),
}

impl Payload {
    /// Serialize a structured request object.
    pub fn json<T: Serialize>(body: &T) -> Result<Self, CoreError> {
        serde_json::to_value(body)
            .map(Payload::Json)
            .map_err(|e| CoreError::Serialization(e.to_string()))
    }
}

/// A fully-described request to the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub endpoint: Endpoint,
    pub method: Method,
    pub payload: Payload,
}

impl ServiceRequest {
    pub fn new(endpoint: Endpoint, payload: Payload) -> Self {
        Self {
            endpoint,
            method: endpoint.method(),
            payload,
        }
    }
}

/// Status and body bytes of a settled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network seam of the dashboard.
///
/// The production implementation is [`super::http::HttpTransport`]; tests
/// substitute a scripted one. A transport only moves bytes: status handling
/// and message extraction live in [`super::service::ServiceClient`].
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    /// Human-readable name of this transport (for logs).
    fn name(&self) -> &str;

    /// Send one request and return whatever the service answered.
    /// `Err` means no HTTP response was received at all.
    async fn send(&self, request: ServiceRequest) -> Result<RawResponse, CoreError>;
}
